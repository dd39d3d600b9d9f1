use std::sync::Arc;

use crate::fetch::RiotApi;
use crate::storage::RosterStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RosterStore>,
    pub riot: Arc<dyn RiotApi>,
}

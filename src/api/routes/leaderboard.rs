use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Player;
use crate::roster::refresh_leaderboard;

/// GET /leaderboard — refresh every player and return the sorted roster.
///
/// Per-player lookup failures never fail the request.
pub async fn leaderboard(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    let report = refresh_leaderboard(&state.store, state.riot.as_ref()).await?;
    Ok(Json(report.players))
}

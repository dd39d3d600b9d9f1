use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::roster::{register_player, RegisterRequest, RegistrationError};

#[derive(Debug, Serialize)]
pub struct AddPlayerResponse {
    pub ok: bool,
}

/// Decode the body by hand so that an empty or non-object body is reported
/// the same way as a missing field.
fn parse_request(body: &[u8]) -> Result<RegisterRequest, RegistrationError> {
    serde_json::from_slice(body).map_err(|_| RegistrationError::InvalidInput("body"))
}

/// POST /admin/add — start tracking a player by Riot ID.
pub async fn add_player(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddPlayerResponse>, ApiError> {
    let request = parse_request(&body)?;
    register_player(&state.store, state.riot.as_ref(), &request).await?;
    Ok(Json(AddPlayerResponse { ok: true }))
}

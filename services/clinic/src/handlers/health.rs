use axum::{extract::State, http::StatusCode};

use carechart_core::health::database_ready;

use crate::state::AppState;

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

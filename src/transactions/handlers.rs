use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    error::internal,
    state::AppState,
    transactions::repo::{self, Transaction},
};

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions))
}

#[instrument(skip(state))]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Vec<Transaction>>, (StatusCode, String)> {
    let transactions = repo::list_by_owner(&state.db, q.owner_id)
        .await
        .map_err(internal)?;
    Ok(Json(transactions))
}

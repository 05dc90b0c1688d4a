use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::internal,
    state::AppState,
    subscriptions,
    users::{
        dto::{HomeQuery, HomeResponse, LoginRequest, PublicUser, RegisterRequest},
        services,
    },
    wallets,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/home", get(home))
        .route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, String)> {
    payload.username = payload.username.trim().to_string();

    if let Err(msg) = services::validate_registration(&payload) {
        warn!(username = %payload.username, "invalid registration input");
        return Err((StatusCode::BAD_REQUEST, msg));
    }

    let user = services::register(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    payload.username = payload.username.trim().to_string();

    let user = services::login(&state.db, payload).await?;
    Ok(Json(user.into()))
}

/// The home view for one user: account fields, wallet, active subscription.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(q): Query<HomeQuery>,
) -> Result<Json<HomeResponse>, (StatusCode, String)> {
    let user = services::get_by_id(&state.db, q.user_id).await?;
    let wallet = wallets::repo::find_by_owner(&state.db, user.id)
        .await
        .map_err(internal)?;
    let subscription = subscriptions::repo::find_active_by_owner(&state.db, user.id)
        .await
        .map_err(internal)?;

    Ok(Json(HomeResponse {
        user: user.into(),
        wallet,
        subscription,
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, (StatusCode, String)> {
    let users = services::get_all_users(&state.db).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

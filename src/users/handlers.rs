use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::Result,
    extract::ApiJson,
    state::AppState,
    users::{
        dto::{CreateUserRequest, UpdateStorageRequest, UserEnvelope},
        repo_types::User,
        services::{self, CreateOutcome},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:uid", get(get_user))
        .route("/users/:uid/storage", put(update_storage))
}

/// POST /users: 201 on first contact, 200 when the uid is already known.
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>)> {
    let (user, outcome) = services::create_or_fetch(state.store.as_ref(), payload).await?;
    let status = match outcome {
        CreateOutcome::Created => StatusCode::CREATED,
        CreateOutcome::Existing => StatusCode::OK,
    };
    Ok((
        status,
        Json(UserEnvelope {
            message: outcome.message(),
            user,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<User>> {
    let user = services::fetch(state.store.as_ref(), &uid).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_storage(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    ApiJson(payload): ApiJson<UpdateStorageRequest>,
) -> Result<Json<UserEnvelope>> {
    let user = services::adjust_storage(state.store.as_ref(), &uid, payload).await?;
    Ok(Json(UserEnvelope {
        message: "Storage updated",
        user,
    }))
}

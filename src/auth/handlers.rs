use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        password::{hash_password_blocking, verify_password_blocking},
    },
    error::ApiError,
    extract::{JsonOrForm, Scalar},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/password/:pass", get(password_hash))
        .route("/login", post(login))
}

/// GET /password/:pass → bcrypt hash of `pass` as plain text.
#[instrument(skip_all)]
pub async fn password_hash(Path(pass): Path<String>) -> Result<String, (StatusCode, &'static str)> {
    match hash_password_blocking(pass).await {
        Ok(hash) => Ok(hash),
        Err(e) => {
            error!(error = %e, "hash_password failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Hashing error"))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(username) = payload.username.filter(Scalar::is_present).map(|s| s.to_text()) else {
        warn!("login without username");
        return Err(ApiError::Auth("Wrong username".into()));
    };

    let mut users = match state.users.find_by_username(&username).await {
        Ok(users) => users,
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err(ApiError::storage(e, "Database server error"));
        }
    };

    // Usernames are unique; any other count is treated as a wrong username.
    if users.len() != 1 {
        warn!(%username, matches = users.len(), "login unknown username");
        return Err(ApiError::Auth("Wrong username".into()));
    }
    let user = users.remove(0);

    let Some(password) = payload.password.filter(Scalar::is_present).map(|s| s.to_text()) else {
        warn!(user_id = user.id, "login without password");
        return Err(ApiError::Auth("Wrong password".into()));
    };

    let ok = match verify_password_blocking(password, user.password).await {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = user.id, "verify_password failed");
            return Err(ApiError::Hash("Hashing error".into()));
        }
    };

    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Auth("Wrong password".into()));
    }

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        ok: true,
        user_id: user.id,
        username: user.username,
    }))
}

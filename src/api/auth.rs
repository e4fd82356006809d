use axum::extract::State;
use serde::Serialize;

use crate::domain::{Credentials, PublicUser, UserCreate};

use super::{ApiError, AppState, Json};

/// Body of a successful login or registration.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: PublicUser,
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.directory.verify_credentials(credentials).await?;
    let token = state.tokens.issue(&user)?;
    Ok(Json(TokenResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(params): Json<UserCreate>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.directory.register(params).await?;
    let token = state.tokens.issue(&user)?;
    Ok(Json(TokenResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

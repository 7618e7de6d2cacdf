use crate::model::user::{
    CreateUserRequest, CreatedUserResponse, MatchingEnabledResponse, UpdateMatchingEnabledRequest,
    UserResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreatedUserResponse>)> {
    req.validate(&())?;

    let user_id = registry.user_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(CreatedUserResponse { user_id })))
}

pub async fn show_user(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_repository()
        .find_by_id(user_id)
        .await
        .and_then(|user| match user {
            Some(user) => Ok(Json(user.into())),
            None => Err(AppError::EntityNotFound(format!("user {user_id} not found"))),
        })
}

pub async fn show_matching_enabled(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MatchingEnabledResponse>> {
    registry
        .roommate_matcher()
        .matching_enabled(user_id)
        .await
        .map(|matching_enabled| Json(MatchingEnabledResponse { matching_enabled }))
}

pub async fn update_matching_enabled(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateMatchingEnabledRequest>,
) -> AppResult<Json<MatchingEnabledResponse>> {
    registry
        .roommate_matcher()
        .set_matching_enabled(user_id, req.enabled)
        .await?;
    Ok(Json(MatchingEnabledResponse {
        matching_enabled: req.enabled,
    }))
}

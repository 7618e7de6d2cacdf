use crate::model::matching::MatchesResponse;
use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_matches(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MatchesResponse>> {
    registry
        .roommate_matcher()
        .rank_candidates(user_id)
        .await
        .map(MatchesResponse::from)
        .map(Json)
}

use crate::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateMatchingEnabled},
        User,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<UserId>;
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
    // マッチングを有効にしているユーザーを登録順に返す。exclude は含めない
    async fn find_matching_enabled(&self, exclude: UserId) -> AppResult<Vec<User>>;
    async fn update_matching_enabled(&self, event: UpdateMatchingEnabled) -> AppResult<()>;
}

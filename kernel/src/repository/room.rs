use crate::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, ReleaseRoom},
        Room,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId>;
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    // オーナーによる手動での空室化
    async fn release(&self, event: ReleaseRoom) -> AppResult<Room>;
}

use crate::model::{
    id::{RoomId, UserId},
    room::RoomCategory,
};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateRoom {
    pub name: String,
    pub owner: UserId,
    pub price: Option<i64>,
    pub location: Option<String>,
    pub category: RoomCategory,
}

#[derive(Debug, new)]
pub struct ReleaseRoom {
    pub room_id: RoomId,
    pub requested_user: UserId,
}

use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{RoomId, UserId},
    room::{event::CreateRoom, Room, RoomCategory},
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

fn known_category(value: &str, _context: &()) -> garde::Result {
    value
        .parse::<RoomCategory>()
        .map(|_| ())
        .map_err(|_| garde::Error::new(format!("unknown room category: {value}")))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub owner_id: UserId,
    #[garde(range(min = 0))]
    pub price: Option<i64>,
    #[garde(skip)]
    pub location: Option<String>,
    #[garde(custom(known_category))]
    pub category: String,
}

impl TryFrom<CreateRoomRequest> for CreateRoom {
    type Error = AppError;

    fn try_from(value: CreateRoomRequest) -> Result<Self, Self::Error> {
        let CreateRoomRequest {
            name,
            owner_id,
            price,
            location,
            category,
        } = value;
        let category = category
            .parse()
            .map_err(|_| AppError::UnprocessableEntity(format!("unknown room category: {category}")))?;
        Ok(CreateRoom::new(name, owner_id, price, location, category))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRoomResponse {
    pub room_id: RoomId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRoomRequest {
    pub owner_id: UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: RoomId,
    pub name: String,
    pub owner_id: UserId,
    pub price: Option<i64>,
    pub location: Option<String>,
    pub category: String,
    pub status: String,
    pub available: bool,
    pub booked_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            name,
            owner,
            price,
            location,
            category,
            status,
            availability,
            created_at,
        } = value;
        Self {
            room_id,
            name,
            owner_id: owner,
            price,
            location,
            category: category.as_ref().to_string(),
            status: status.as_ref().to_string(),
            available: availability.available,
            booked_by: availability.booked_by,
            created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

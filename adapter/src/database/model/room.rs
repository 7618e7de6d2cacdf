use kernel::model::{
    id::{RoomId, UserId},
    room::{Room, RoomAvailability},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct RoomRow {
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

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(value: RoomRow) -> Result<Self, Self::Error> {
        let RoomRow {
            room_id,
            name,
            owner_id,
            price,
            location,
            category,
            status,
            available,
            booked_by,
            created_at,
        } = value;
        Ok(Room {
            room_id,
            name,
            owner: owner_id,
            price,
            location,
            category: category.parse().map_err(|_| {
                AppError::ConversionEntityError(format!("unknown room category: {category}"))
            })?,
            status: status.parse().map_err(|_| {
                AppError::ConversionEntityError(format!("unknown room status: {status}"))
            })?,
            availability: RoomAvailability {
                available,
                booked_by,
            },
            created_at,
        })
    }
}

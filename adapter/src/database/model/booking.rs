use kernel::model::{
    booking::Booking,
    id::{BookingId, RoomId, UserId},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub owner_id: UserId,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            room_id,
            user_id,
            owner_id,
            status,
            payment_status,
            created_at,
            updated_at,
        } = value;
        Ok(Booking {
            booking_id,
            room_id,
            user_id,
            owner_id,
            status: status.parse().map_err(|_| {
                AppError::ConversionEntityError(format!("unknown booking status: {status}"))
            })?,
            payment_status: payment_status.parse().map_err(|_| {
                AppError::ConversionEntityError(format!("unknown payment status: {payment_status}"))
            })?,
            created_at,
            updated_at,
        })
    }
}

pub fn into_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, AppError> {
    rows.into_iter().map(Booking::try_from).collect()
}

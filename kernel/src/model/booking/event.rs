use crate::model::{
    booking::OwnerDecision,
    id::{BookingId, RoomId, UserId},
};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateBooking {
    pub room_id: RoomId,
    pub user_id: UserId,
}

#[derive(Debug, new)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub requested_user: UserId,
    pub decision: OwnerDecision,
}

#[derive(Debug, new)]
pub struct MarkBookingPaid {
    pub room_id: RoomId,
    pub user_id: UserId,
}

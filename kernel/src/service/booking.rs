use crate::{
    model::{
        booking::{
            event::{CreateBooking, MarkBookingPaid, UpdateBookingStatus},
            Booking, BookingRequestError, OwnerDecision,
        },
        id::{BookingId, RoomId, UserId},
        role::Capability,
        room::{event::ReleaseRoom, Room},
    },
    notification::{Notification, NotificationDispatcher},
    repository::{booking::BookingRepository, room::RoomRepository, user::UserRepository},
};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// Drives a booking through `(status, payment_status)` transitions and owns
/// every write to room availability.
#[derive(Clone, new)]
pub struct BookingLifecycle {
    booking_repository: Arc<dyn BookingRepository>,
    room_repository: Arc<dyn RoomRepository>,
    user_repository: Arc<dyn UserRepository>,
    dispatcher: NotificationDispatcher,
}

impl BookingLifecycle {
    pub async fn request_booking(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<Booking, BookingRequestError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("user {user_id} not found")))?;
        if !user.role.has(Capability::Book) {
            return Err(AppError::Unauthorized(format!(
                "user {user_id} is not allowed to book rooms"
            ))
            .into());
        }

        let booking = self
            .booking_repository
            .create(CreateBooking::new(room_id, user_id))
            .await?;
        tracing::info!(
            booking_id = %booking.booking_id,
            room_id = %room_id,
            user_id = %user_id,
            "booking requested"
        );
        Ok(booking)
    }

    pub async fn accept_booking(
        &self,
        booking_id: BookingId,
        acting_owner: UserId,
    ) -> AppResult<Booking> {
        self.decide(booking_id, acting_owner, OwnerDecision::Accept)
            .await
    }

    pub async fn decline_booking(
        &self,
        booking_id: BookingId,
        acting_owner: UserId,
    ) -> AppResult<Booking> {
        self.decide(booking_id, acting_owner, OwnerDecision::Decline)
            .await
    }

    pub async fn mark_booking_paid(&self, room_id: RoomId, user_id: UserId) -> AppResult<Booking> {
        let booking = self
            .booking_repository
            .mark_paid(MarkBookingPaid::new(room_id, user_id))
            .await?;
        tracing::info!(
            booking_id = %booking.booking_id,
            room_id = %room_id,
            user_id = %user_id,
            "booking paid, room is now occupied"
        );
        Ok(booking)
    }

    pub async fn delete_booking(&self, booking_id: BookingId) -> AppResult<()> {
        self.booking_repository.delete(booking_id).await?;
        tracing::info!(booking_id = %booking_id, "booking deleted");
        Ok(())
    }

    pub async fn release_room(&self, room_id: RoomId, acting_owner: UserId) -> AppResult<Room> {
        let room = self
            .room_repository
            .release(ReleaseRoom::new(room_id, acting_owner))
            .await?;
        tracing::info!(room_id = %room_id, "room released by owner");
        Ok(room)
    }

    pub async fn get_booking(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("booking {booking_id} not found")))
    }

    pub async fn owner_requests(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        self.booking_repository
            .find_pending_by_owner_id(owner_id)
            .await
    }

    pub async fn owner_accepted_bookings(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        self.booking_repository
            .find_accepted_by_owner_id(owner_id)
            .await
    }

    pub async fn user_requests(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        self.booking_repository.find_by_user_id(user_id).await
    }

    async fn decide(
        &self,
        booking_id: BookingId,
        acting_owner: UserId,
        decision: OwnerDecision,
    ) -> AppResult<Booking> {
        let outcome = self
            .booking_repository
            .update_status(UpdateBookingStatus::new(booking_id, acting_owner, decision))
            .await?;
        tracing::info!(
            booking_id = %booking_id,
            decision = ?decision,
            changed = outcome.changed,
            "owner decided on booking"
        );

        // 状態の確定後に通知する。通知の失敗は結果に影響させない
        if outcome.changed {
            self.notify_requester(&outcome.booking, decision).await;
        }
        Ok(outcome.booking)
    }

    async fn notify_requester(&self, booking: &Booking, decision: OwnerDecision) {
        let requester = match self.user_repository.find_by_id(booking.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error.message = %e, "could not load requester for notification");
                return;
            }
        };
        let Some(to) = requester.contact_address() else {
            tracing::debug!(user_id = %requester.user_id, "requester has no contact address");
            return;
        };
        let room_name = match self.room_repository.find_by_id(booking.room_id).await {
            Ok(Some(room)) => room.name,
            _ => "your requested room".to_string(),
        };

        let (subject, verb) = match decision {
            OwnerDecision::Accept => ("Your booking request was accepted", "accepted"),
            OwnerDecision::Decline => ("Your booking request was declined", "declined"),
        };
        let body = format!(
            "Hello {},\n\nThe owner has {} your booking request for {}.\nBooking id: {}\n",
            requester.user_name, verb, room_name, booking.booking_id
        );
        self.dispatcher
            .dispatch(Notification::new(to.to_string(), subject.to_string(), body));
    }
}

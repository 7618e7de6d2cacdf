use crate::model::id::{BookingId, RoomId, UserId};
use chrono::{DateTime, Utc};
use shared::error::AppError;
use strum::{AsRefStr, EnumString};
use thiserror::Error;

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    // 作成時点の部屋のオーナー
    pub owner_id: UserId,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new_request(room_id: RoomId, user_id: UserId, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            booking_id: BookingId::new(),
            room_id,
            user_id,
            owner_id,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// `(pending, pending)`: a request the owner has not answered yet.
    pub fn is_pending_request(&self) -> bool {
        self.status == BookingStatus::Pending && self.payment_status == PaymentStatus::Pending
    }

    /// Accepted and not cancelled: a live claim on the room.
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Accepted && self.payment_status != PaymentStatus::Cancelled
    }

    pub fn is_awaiting_payment(&self) -> bool {
        self.payment_status == PaymentStatus::Pending
    }

    pub fn is_for(&self, room_id: RoomId, user_id: UserId) -> bool {
        self.room_id == room_id && self.user_id == user_id
    }

    pub fn authorize_owner(&self, acting_owner: UserId) -> Result<(), AppError> {
        if self.owner_id != acting_owner {
            return Err(AppError::Unauthorized(format!(
                "user {acting_owner} does not own booking {}",
                self.booking_id
            )));
        }
        Ok(())
    }

    // 状態が変わった場合は true を返す
    pub fn apply(&mut self, decision: OwnerDecision) -> Result<bool, AppError> {
        match decision {
            OwnerDecision::Accept => match self.status {
                BookingStatus::Declined => Err(AppError::InvalidStateTransition(format!(
                    "booking {} has already been declined",
                    self.booking_id
                ))),
                BookingStatus::Accepted => Ok(false),
                BookingStatus::Pending => {
                    self.status = BookingStatus::Accepted;
                    self.updated_at = Utc::now();
                    Ok(true)
                }
            },
            OwnerDecision::Decline => {
                if self.payment_status != PaymentStatus::Pending {
                    return Err(AppError::InvalidStateTransition(format!(
                        "booking {} is already {}",
                        self.booking_id,
                        self.payment_status.as_ref()
                    )));
                }
                self.status = BookingStatus::Declined;
                self.payment_status = PaymentStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(true)
            }
        }
    }

    pub fn mark_paid(&mut self) -> Result<(), AppError> {
        if !self.is_awaiting_payment() {
            return Err(AppError::InvalidStateTransition(format!(
                "booking {} is not awaiting payment",
                self.booking_id
            )));
        }
        self.payment_status = PaymentStatus::Paid;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerDecision {
    Accept,
    Decline,
}

/// Result of an owner decision; `changed` is false when the booking was
/// already in the requested state.
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub booking: Booking,
    pub changed: bool,
}

#[derive(Debug, Error)]
pub enum BookingRequestError {
    #[error("an accepted booking for this room already exists")]
    DuplicateActive(Box<Booking>),
    #[error("a pending request for this room already exists")]
    DuplicatePending(Box<Booking>),
    #[error(transparent)]
    App(#[from] AppError),
}

/// Looks for a booking of the same (room, user) pair that blocks a new
/// request. An active booking wins over a pending one.
pub fn ensure_no_duplicate<'a, I>(existing: I) -> Result<(), BookingRequestError>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let mut pending = None;
    for booking in existing {
        if booking.is_active() {
            return Err(BookingRequestError::DuplicateActive(Box::new(
                booking.clone(),
            )));
        }
        if pending.is_none() && booking.is_pending_request() {
            pending = Some(booking);
        }
    }
    match pending {
        Some(booking) => Err(BookingRequestError::DuplicatePending(Box::new(
            booking.clone(),
        ))),
        None => Ok(()),
    }
}

/// An accepted booking may not sit next to another active booking of the
/// same (room, user) pair.
pub fn ensure_no_other_active<'a, I>(booking: &Booking, siblings: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = &'a Booking>,
{
    if booking.status != BookingStatus::Accepted {
        return Ok(());
    }
    let conflict = siblings.into_iter().find(|other| {
        other.booking_id != booking.booking_id
            && other.is_for(booking.room_id, booking.user_id)
            && other.is_active()
    });
    match conflict {
        Some(other) => Err(AppError::InvalidStateTransition(format!(
            "booking {} is already active for this room",
            other.booking_id
        ))),
        None => Ok(()),
    }
}

//! In-process store implementing every repository trait.
//!
//! All tables sit behind one `tokio::sync::Mutex`, so each repository call is
//! a single critical section: duplicate checks and inserts, ownership checks
//! and status writes, and payment plus room occupancy never interleave with
//! another call.

use async_trait::async_trait;
use chrono::Utc;
use kernel::model::{
    booking::{
        ensure_no_duplicate, ensure_no_other_active,
        event::{CreateBooking, MarkBookingPaid, UpdateBookingStatus},
        Booking, BookingRequestError, BookingStatus, DecisionOutcome,
    },
    id::{BookingId, RoomId, UserId},
    room::{
        event::{CreateRoom, ReleaseRoom},
        Room, RoomAvailability, RoomStatus,
    },
    user::{
        event::{CreateUser, UpdateMatchingEnabled},
        User,
    },
};
use kernel::repository::{
    booking::BookingRepository, room::RoomRepository, user::UserRepository,
};
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Tables {
    // 登録順を保つため Vec で持つ
    users: Vec<User>,
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
}

impl Tables {
    fn room_mut(&mut self, room_id: RoomId) -> AppResult<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|r| r.room_id == room_id)
            .ok_or_else(|| AppError::EntityNotFound(format!("room {room_id} not found")))
    }

    fn bookings_where(&self, predicate: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        self.bookings.iter().filter(|b| predicate(b)).cloned().collect()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, event: CreateUser) -> AppResult<UserId> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .iter()
            .any(|u| u.email == event.email || u.user_name == event.user_name)
        {
            return Err(AppError::UnprocessableEntity(format!(
                "user {} or email {} is already registered",
                event.user_name, event.email
            )));
        }
        let user_id = UserId::new();
        tables.users.push(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            role: event.role,
            matching_enabled: true,
            profile: event.profile,
        });
        Ok(user_id)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_matching_enabled(&self, exclude: UserId) -> AppResult<Vec<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| u.matching_enabled && u.user_id != exclude)
            .cloned()
            .collect())
    }

    async fn update_matching_enabled(&self, event: UpdateMatchingEnabled) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.user_id == event.user_id)
            .ok_or_else(|| AppError::EntityNotFound(format!("user {} not found", event.user_id)))?;
        user.matching_enabled = event.enabled;
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        let mut tables = self.tables.lock().await;
        if !tables.users.iter().any(|u| u.user_id == event.owner) {
            return Err(AppError::EntityNotFound(format!(
                "owner {} not found",
                event.owner
            )));
        }
        let room_id = RoomId::new();
        tables.rooms.push(Room {
            room_id,
            name: event.name,
            owner: event.owner,
            price: event.price,
            location: event.location,
            category: event.category,
            status: RoomStatus::default(),
            availability: RoomAvailability::vacant(),
            created_at: Utc::now(),
        });
        Ok(room_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let tables = self.tables.lock().await;
        Ok(tables.rooms.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let tables = self.tables.lock().await;
        Ok(tables.rooms.iter().find(|r| r.room_id == room_id).cloned())
    }

    async fn release(&self, event: ReleaseRoom) -> AppResult<Room> {
        let mut tables = self.tables.lock().await;
        let room = tables.room_mut(event.room_id)?;
        if room.owner != event.requested_user {
            return Err(AppError::Unauthorized(format!(
                "user {} does not own room {}",
                event.requested_user, event.room_id
            )));
        }
        room.availability.release();
        Ok(room.clone())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create(&self, event: CreateBooking) -> Result<Booking, BookingRequestError> {
        let mut tables = self.tables.lock().await;
        let owner_id = tables.room_mut(event.room_id)?.owner;

        ensure_no_duplicate(
            tables
                .bookings
                .iter()
                .filter(|b| b.is_for(event.room_id, event.user_id)),
        )?;

        let booking = Booking::new_request(event.room_id, event.user_id, owner_id);
        tables.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<DecisionOutcome> {
        let mut tables = self.tables.lock().await;
        let index = tables
            .bookings
            .iter()
            .position(|b| b.booking_id == event.booking_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("booking {} not found", event.booking_id))
            })?;

        // 検証が終わるまでは複製に対して適用し、失敗時に状態を残さない
        let mut booking = tables.bookings[index].clone();
        booking.authorize_owner(event.requested_user)?;
        let changed = booking.apply(event.decision)?;
        if changed {
            ensure_no_other_active(&booking, &tables.bookings)?;
            tables.bookings[index] = booking.clone();
        }
        Ok(DecisionOutcome { booking, changed })
    }

    async fn mark_paid(&self, event: MarkBookingPaid) -> AppResult<Booking> {
        let mut tables = self.tables.lock().await;
        let index = tables
            .bookings
            .iter()
            .position(|b| b.is_for(event.room_id, event.user_id) && b.is_awaiting_payment())
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "no booking awaiting payment for room {} and user {}",
                    event.room_id, event.user_id
                ))
            })?;

        let mut booking = tables.bookings[index].clone();
        booking.mark_paid()?;
        // 部屋が見つからなければ予約も更新しない
        tables.room_mut(event.room_id)?.availability.occupy(event.user_id);
        tables.bookings[index] = booking.clone();
        Ok(booking)
    }

    async fn delete(&self, booking_id: BookingId) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        let before = tables.bookings.len();
        tables.bookings.retain(|b| b.booking_id != booking_id);
        if tables.bookings.len() == before {
            return Err(AppError::EntityNotFound(format!(
                "booking {booking_id} not found"
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .bookings
            .iter()
            .find(|b| b.booking_id == booking_id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        let tables = self.tables.lock().await;
        Ok(tables.bookings_where(|b| b.user_id == user_id))
    }

    async fn find_pending_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        let tables = self.tables.lock().await;
        Ok(tables.bookings_where(|b| b.owner_id == owner_id && b.is_pending_request()))
    }

    async fn find_accepted_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        let tables = self.tables.lock().await;
        Ok(tables.bookings_where(|b| {
            b.owner_id == owner_id && b.status == BookingStatus::Accepted
        }))
    }
}

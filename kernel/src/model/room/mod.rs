use crate::model::id::{RoomId, UserId};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub owner: UserId,
    pub price: Option<i64>,
    pub location: Option<String>,
    pub category: RoomCategory,
    pub status: RoomStatus,
    pub availability: RoomAvailability,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum RoomCategory {
    #[strum(serialize = "single room")]
    SingleRoom,
    #[strum(serialize = "two room")]
    TwoRoom,
    #[strum(serialize = "2 BHK")]
    TwoBhk,
    #[strum(serialize = "3 BHK")]
    ThreeBhk,
    #[strum(serialize = "4 BHK")]
    FourBhk,
    #[strum(serialize = "flat")]
    Flat,
    #[strum(serialize = "house")]
    House,
}

// 一覧に表示されるかどうかは status で決まる
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Occupancy of a room. Only the booking lifecycle writes it: `occupy` when a
/// booking is paid, `release` when the owner frees the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomAvailability {
    pub available: bool,
    pub booked_by: Option<UserId>,
}

impl Default for RoomAvailability {
    fn default() -> Self {
        Self::vacant()
    }
}

impl RoomAvailability {
    pub fn vacant() -> Self {
        Self {
            available: true,
            booked_by: None,
        }
    }

    pub fn occupy(&mut self, user_id: UserId) {
        self.available = false;
        self.booked_by = Some(user_id);
    }

    pub fn release(&mut self) {
        *self = Self::vacant();
    }
}

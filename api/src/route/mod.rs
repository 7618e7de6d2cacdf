pub mod booking;
pub mod health;
pub mod matching;
pub mod room;
pub mod user;
pub mod v1;

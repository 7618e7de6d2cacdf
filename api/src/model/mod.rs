pub mod booking;
pub mod matching;
pub mod room;
pub mod user;

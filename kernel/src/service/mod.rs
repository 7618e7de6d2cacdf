pub mod booking;
pub mod matching;

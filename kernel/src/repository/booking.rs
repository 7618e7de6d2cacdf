use crate::model::{
    booking::{
        event::{CreateBooking, MarkBookingPaid, UpdateBookingStatus},
        Booking, BookingRequestError, DecisionOutcome,
    },
    id::{BookingId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 重複チェックと登録を (room, user) 単位で不可分に行う
    async fn create(&self, event: CreateBooking) -> Result<Booking, BookingRequestError>;
    // オーナー確認と状態更新を予約単位で直列化して行う
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<DecisionOutcome>;
    // 支払い済みへの更新と部屋の空き状況の更新を同一トランザクションで行う
    async fn mark_paid(&self, event: MarkBookingPaid) -> AppResult<Booking>;
    async fn delete(&self, booking_id: BookingId) -> AppResult<()>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
    // オーナー宛ての未回答リクエスト (pending, pending)
    async fn find_pending_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>>;
    async fn find_accepted_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>>;
}

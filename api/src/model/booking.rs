use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use kernel::model::{
    booking::{Booking, BookingRequestError},
    id::{BookingId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: RoomId,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDecisionRequest {
    pub owner_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkBookingPaidRequest {
    pub room_id: RoomId,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub owner_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub owner_id: UserId,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            room_id,
            user_id,
            owner_id,
            status,
            payment_status,
            created_at,
            updated_at,
        } = value;
        Self {
            booking_id,
            room_id,
            user_id,
            owner_id,
            status: status.as_ref().to_string(),
            payment_status: payment_status.as_ref().to_string(),
            created_at,
            updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateBookingResponse {
    pub kind: String,
    pub message: String,
    pub existing: BookingResponse,
}

// 重複エラーは既存の予約を添えて 409 で返す
pub struct BookingRequestRejection(pub BookingRequestError);

impl From<BookingRequestError> for BookingRequestRejection {
    fn from(value: BookingRequestError) -> Self {
        Self(value)
    }
}

impl IntoResponse for BookingRequestRejection {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (kind, existing) = match self.0 {
            BookingRequestError::DuplicateActive(existing) => ("duplicateActive", existing),
            BookingRequestError::DuplicatePending(existing) => ("duplicatePending", existing),
            BookingRequestError::App(e) => return e.into_response(),
        };
        let body = DuplicateBookingResponse {
            kind: kind.into(),
            message,
            existing: BookingResponse::from(*existing),
        };
        (StatusCode::CONFLICT, Json(body)).into_response()
    }
}

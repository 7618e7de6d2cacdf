use crate::model::booking::{
    BookingRequestRejection, BookingResponse, BookingsResponse, CreateBookingRequest,
    MarkBookingPaidRequest, OwnerDecisionRequest, OwnerQuery, UserQuery,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use kernel::model::id::{BookingId, UserId};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn request_booking(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), BookingRequestRejection> {
    let booking = registry
        .booking_lifecycle()
        .request_booking(req.room_id, req.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn accept_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<OwnerDecisionRequest>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_lifecycle()
        .accept_booking(booking_id, req.owner_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn decline_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<OwnerDecisionRequest>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_lifecycle()
        .decline_booking(booking_id, req.owner_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn mark_booking_paid(
    State(registry): State<AppRegistry>,
    Json(req): Json<MarkBookingPaidRequest>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_lifecycle()
        .mark_booking_paid(req.room_id, req.user_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn delete_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_lifecycle()
        .delete_booking(booking_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn show_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_lifecycle()
        .get_booking(booking_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn show_owner_requests(
    Query(query): Query<OwnerQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_lifecycle()
        .owner_requests(query.owner_id)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_my_requests(
    Query(query): Query<UserQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_lifecycle()
        .user_requests(query.user_id)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_owner_accepted_bookings(
    Path(owner_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_lifecycle()
        .owner_accepted_bookings(owner_id)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

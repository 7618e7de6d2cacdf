use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    accept_booking, decline_booking, delete_booking, mark_booking_paid, request_booking,
    show_booking, show_my_requests, show_owner_accepted_bookings, show_owner_requests,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", post(request_booking))
        .route("/mark-paid", post(mark_booking_paid))
        .route("/owner-requests", get(show_owner_requests))
        .route("/my-requests", get(show_my_requests))
        .route("/owned/accepted/:owner_id", get(show_owner_accepted_bookings))
        .route("/:booking_id", get(show_booking).delete(delete_booking))
        .route("/:booking_id/accept", post(accept_booking))
        .route("/:booking_id/decline", post(decline_booking));

    Router::new().nest("/bookings", bookings_routers)
}

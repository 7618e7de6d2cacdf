use std::sync::Arc;

use adapter::{memory::InMemoryStore, notifier::LogNotifier};
use api::route::v1;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use registry::AppRegistry;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let registry = AppRegistry::in_memory(InMemoryStore::new(), Arc::new(LogNotifier));
    v1::routes().with_state(registry)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_user(app: &Router, body: Value) -> String {
    let (status, value) = call(app, "POST", "/api/v1/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    value["userId"].as_str().unwrap().to_string()
}

async fn register_room(app: &Router, owner_id: &str) -> String {
    let (status, value) = call(
        app,
        "POST",
        "/api/v1/rooms",
        Some(json!({
            "name": "sunny corner",
            "ownerId": owner_id,
            "price": 12000,
            "location": "north campus",
            "category": "2 BHK"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    value["roomId"].as_str().unwrap().to_string()
}

async fn owner_and_tenant(app: &Router) -> (String, String, String) {
    let owner = register_user(
        app,
        json!({ "userName": "owner", "email": "owner@example.com" }),
    )
    .await;
    let tenant = register_user(
        app,
        json!({ "userName": "tenant", "email": "tenant@example.com" }),
    )
    .await;
    let room = register_room(app, &owner).await;
    (owner, tenant, room)
}

#[tokio::test]
async fn health_check_responds_ok() {
    let app = app();
    let (status, _) = call(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn booking_flow_from_request_to_release() {
    let app = app();
    let (owner, tenant, room) = owner_and_tenant(&app).await;

    let (status, booking) = call(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(json!({ "roomId": room, "userId": tenant })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["paymentStatus"], "pending");
    let booking_id = booking["bookingId"].as_str().unwrap().to_string();

    let (status, requests) = call(
        &app,
        "GET",
        &format!("/api/v1/bookings/owner-requests?ownerId={owner}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requests["items"].as_array().unwrap().len(), 1);

    let (status, accepted) = call(
        &app,
        "POST",
        &format!("/api/v1/bookings/{booking_id}/accept"),
        Some(json!({ "ownerId": owner })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["status"], "accepted");

    let (status, paid) = call(
        &app,
        "POST",
        "/api/v1/bookings/mark-paid",
        Some(json!({ "roomId": room, "userId": tenant })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["paymentStatus"], "paid");

    let (_, shown) = call(&app, "GET", &format!("/api/v1/rooms/{room}"), None).await;
    assert_eq!(shown["available"], false);
    assert_eq!(shown["bookedBy"], tenant.as_str());

    let (status, released) = call(
        &app,
        "POST",
        &format!("/api/v1/rooms/{room}/release"),
        Some(json!({ "ownerId": owner })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(released["available"], true);
    assert_eq!(released["bookedBy"], Value::Null);

    let (_, dashboard) = call(
        &app,
        "GET",
        &format!("/api/v1/bookings/owned/accepted/{owner}"),
        None,
    )
    .await;
    assert_eq!(dashboard["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_request_is_rejected_with_existing_booking() {
    let app = app();
    let (_, tenant, room) = owner_and_tenant(&app).await;
    let body = json!({ "roomId": room, "userId": tenant });

    let (_, first) = call(&app, "POST", "/api/v1/bookings", Some(body.clone())).await;
    let (status, conflict) = call(&app, "POST", "/api/v1/bookings", Some(body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["kind"], "duplicatePending");
    assert_eq!(conflict["existing"]["bookingId"], first["bookingId"]);

    let (_, mine) = call(
        &app,
        "GET",
        &format!("/api/v1/bookings/my-requests?userId={tenant}"),
        None,
    )
    .await;
    assert_eq!(mine["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn decision_by_a_stranger_is_forbidden() {
    let app = app();
    let (_, tenant, room) = owner_and_tenant(&app).await;
    let (_, booking) = call(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(json!({ "roomId": room, "userId": tenant })),
    )
    .await;
    let booking_id = booking["bookingId"].as_str().unwrap();

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/v1/bookings/{booking_id}/decline"),
        Some(json!({ "ownerId": tenant })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, unchanged) = call(&app, "GET", &format!("/api/v1/bookings/{booking_id}"), None).await;
    assert_eq!(unchanged["status"], "pending");
}

#[tokio::test]
async fn deleted_booking_is_gone() {
    let app = app();
    let (_, tenant, room) = owner_and_tenant(&app).await;
    let (_, booking) = call(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(json!({ "roomId": room, "userId": tenant })),
    )
    .await;
    let uri = format!("/api/v1/bookings/{}", booking["bookingId"].as_str().unwrap());

    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_registration_is_a_bad_request() {
    let app = app();
    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/users",
        Some(json!({ "userName": "", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn matches_are_ranked_and_toggle_is_respected() {
    let app = app();
    let subject = register_user(
        &app,
        json!({
            "userName": "subject",
            "email": "subject@example.com",
            "gender": "female",
            "preferredRoommateGender": "any",
            "age": 25,
            "budget": 10000,
            "cleanliness": 7,
            "isSmoker": false,
            "isPetFriendly": true,
            "hobbies": ["reading", "hiking"]
        }),
    )
    .await;
    let close = register_user(
        &app,
        json!({
            "userName": "close",
            "email": "close@example.com",
            "gender": "male",
            "age": 27,
            "budget": 12000,
            "cleanliness": 8,
            "isSmoker": false,
            "isPetFriendly": true,
            "hobbies": ["reading", "gaming"]
        }),
    )
    .await;
    let far = register_user(
        &app,
        json!({
            "userName": "far",
            "email": "far@example.com",
            "gender": "male",
            "age": 40,
            "budget": 30000,
            "cleanliness": 2,
            "isSmoker": true,
            "isPetFriendly": false,
            "hobbies": ["golf"]
        }),
    )
    .await;

    let (status, ranked) = call(&app, "GET", &format!("/api/v1/matches/{subject}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = ranked["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["userId"], close.as_str());
    assert_eq!(items[0]["matchScore"], 90);
    assert_eq!(items[1]["userId"], far.as_str());

    let (status, toggled) = call(
        &app,
        "PUT",
        &format!("/api/v1/users/{subject}/matching"),
        Some(json!({ "enabled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["matchingEnabled"], false);

    let (_, ranked) = call(&app, "GET", &format!("/api/v1/matches/{subject}"), None).await;
    assert!(ranked["items"].as_array().unwrap().is_empty());

    let (_, flag) = call(&app, "GET", &format!("/api/v1/users/{subject}/matching"), None).await;
    assert_eq!(flag["matchingEnabled"], false);
}

#[tokio::test]
async fn duplicate_registration_is_unprocessable() {
    let app = app();
    let body = json!({ "userName": "mina", "email": "mina@example.com" });
    register_user(&app, body.clone()).await;

    let (status, _) = call(&app, "POST", "/api/v1/users", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

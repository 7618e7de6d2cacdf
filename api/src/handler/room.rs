use crate::model::room::{
    CreateRoomRequest, CreatedRoomResponse, ReleaseRoomRequest, RoomResponse, RoomsResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::RoomId, room::event::CreateRoom};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_room(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<CreatedRoomResponse>)> {
    req.validate(&())?;

    let event = CreateRoom::try_from(req)?;
    registry
        .user_repository()
        .find_by_id(event.owner)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("user {} not found", event.owner)))?;

    let room_id = registry.room_repository().create(event).await?;
    Ok((StatusCode::CREATED, Json(CreatedRoomResponse { room_id })))
}

pub async fn show_room_list(State(registry): State<AppRegistry>) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound(format!("room {room_id} not found"))),
        })
}

pub async fn release_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ReleaseRoomRequest>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .booking_lifecycle()
        .release_room(room_id, req.owner_id)
        .await
        .map(RoomResponse::from)
        .map(Json)
}

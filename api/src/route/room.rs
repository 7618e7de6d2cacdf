use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::room::{register_room, release_room, show_room, show_room_list};

pub fn build_room_routers() -> Router<AppRegistry> {
    let rooms_routers = Router::new()
        .route("/", post(register_room))
        .route("/", get(show_room_list))
        .route("/:room_id", get(show_room))
        .route("/:room_id/release", post(release_room));

    Router::new().nest("/rooms", rooms_routers)
}

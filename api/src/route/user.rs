use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    register_user, show_matching_enabled, show_user, update_matching_enabled,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let users_routers = Router::new()
        .route("/", post(register_user))
        .route("/:user_id", get(show_user))
        .route(
            "/:user_id/matching",
            get(show_matching_enabled).put(update_matching_enabled),
        );

    Router::new().nest("/users", users_routers)
}

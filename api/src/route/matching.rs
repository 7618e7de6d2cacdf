use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::matching::show_matches;

pub fn build_matching_routers() -> Router<AppRegistry> {
    let matches_routers = Router::new().route("/:user_id", get(show_matches));
    Router::new().nest("/matches", matches_routers)
}

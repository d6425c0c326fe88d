use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{events, health_check, users};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/event/create", post(events::create_event))
        .route("/api/events", get(events::list_events))
        .route("/api/event/:id", get(events::get_event))
        .route("/api/user/profile/:id", get(users::get_user_profile))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

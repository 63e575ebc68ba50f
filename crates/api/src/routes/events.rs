use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/events", post(handlers::events::create_event))
        .route("/api/events/pending", get(handlers::events::list_pending_events))
        .route("/api/events/approved", get(handlers::events::list_approved_events))
        .route(
            "/api/events/approved/:id",
            get(handlers::events::get_approved_event),
        )
        .route(
            "/api/events/by-creator/:email",
            get(handlers::events::list_events_by_creator),
        )
        .route(
            "/api/events/join/:id",
            get(handlers::events::resolve_join_link).post(handlers::events::join_event),
        )
        .route(
            "/api/events/:id",
            get(handlers::events::get_event).delete(handlers::events::delete_event),
        )
}

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/attendees/register", post(handlers::attendees::register_attendee))
        .route("/api/attendees/:event_id", get(handlers::attendees::list_attendees))
        .route(
            "/api/attendees/remove/:id",
            delete(handlers::attendees::remove_attendee),
        )
        .route(
            "/api/attendees/send-reminder/:event_id",
            post(handlers::attendees::send_reminders),
        )
}

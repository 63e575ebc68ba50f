use axum::{routing::patch, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/approve/:id", patch(handlers::admin::approve_event))
        .route("/api/admin/reject/:id", patch(handlers::admin::reject_event))
}

use axum::{Router, routing::get};
use crate::handler::workshop_handler::list_active_workshops_handler;
use std::sync::Arc;
use crate::service::workshop_service::WorkshopService;

pub fn workshop_router(service: Arc<dyn WorkshopService>) -> Router {
    Router::new()
        .route("/workshops", get(list_active_workshops_handler))
        .with_state(service)
}

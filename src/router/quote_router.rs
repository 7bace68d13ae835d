use axum::{Router, routing::{post, get}};
use crate::handler::quote_handler::{
    create_quote_handler,
    check_step_handler,
    estimate_savings_handler,
};
use std::sync::Arc;
use crate::service::quote_service::QuoteService;

pub fn quote_router(service: Arc<dyn QuoteService>) -> Router {
    Router::new()
        .route("/quotes", post(create_quote_handler))
        .route("/quotes/steps/{step}/check", post(check_step_handler))
        .route("/quotes/estimate", get(estimate_savings_handler))
        .with_state(service)
}

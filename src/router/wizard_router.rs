use axum::{Router, routing::{post, get}};
use crate::handler::wizard_handler::{
    create_wizard_handler,
    get_wizard_handler,
    advance_wizard_handler,
    retreat_wizard_handler,
    submit_wizard_handler,
    discard_wizard_handler,
    WizardState,
};
use std::sync::Arc;

pub fn wizard_router(state: Arc<WizardState>) -> Router {
    Router::new()
        .route("/wizard", post(create_wizard_handler))
        .route("/wizard/{id}", get(get_wizard_handler).delete(discard_wizard_handler))
        .route("/wizard/{id}/advance", post(advance_wizard_handler))
        .route("/wizard/{id}/retreat", post(retreat_wizard_handler))
        .route("/wizard/{id}/submit", post(submit_wizard_handler))
        .with_state(state)
}

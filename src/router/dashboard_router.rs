use axum::{Router, routing::get, middleware};
use crate::handler::dashboard_handler::{
    list_quotes_handler,
    list_workshops_handler,
    dashboard_handler,
    DashboardState,
};
use std::sync::Arc;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

/// Admin-only routes.
pub fn dashboard_router(state: Arc<DashboardState>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    Router::new()
        .route("/admin/quotes", get(list_quotes_handler))
        .route("/admin/workshops", get(list_workshops_handler))
        .route("/admin/dashboard", get(dashboard_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
        .with_state(state)
}

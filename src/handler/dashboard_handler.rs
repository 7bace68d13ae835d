use axum::{extract::State, response::IntoResponse, Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::dto::quote_dto::QuoteResponse;
use crate::dto::workshop_dto::WorkshopResponse;
use crate::model::user::CurrentUser;
use crate::service::dashboard_service::DashboardService;
use crate::service::quote_service::QuoteService;
use crate::service::workshop_service::WorkshopService;
use crate::util::error::HandlerError;

pub struct DashboardState {
    pub quote_service: Arc<dyn QuoteService>,
    pub workshop_service: Arc<dyn WorkshopService>,
    pub dashboard_service: Arc<dyn DashboardService>,
}

pub async fn list_quotes_handler(
    State(state): State<Arc<DashboardState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = state.quote_service.list_quotes().await?;
    Ok(Json(quotes.into_iter().map(QuoteResponse::from).collect::<Vec<_>>()))
}

pub async fn list_workshops_handler(
    State(state): State<Arc<DashboardState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let workshops = state.workshop_service.list_workshops().await?;
    Ok(Json(workshops.into_iter().map(WorkshopResponse::from).collect::<Vec<_>>()))
}

pub async fn dashboard_handler(
    State(state): State<Arc<DashboardState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, HandlerError> {
    info!(email = %user.email, "Dashboard requested");
    Ok(Json(state.dashboard_service.dashboard().await?))
}

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::dto::workshop_dto::WorkshopResponse;
use crate::service::workshop_service::WorkshopService;
use crate::util::error::HandlerError;

/// Public listing: active workshops, earliest first.
pub async fn list_active_workshops_handler(
    State(service): State<Arc<dyn WorkshopService>>,
) -> Result<impl IntoResponse, HandlerError> {
    let workshops = service.list_active_workshops().await?;
    Ok(Json(workshops.into_iter().map(WorkshopResponse::from).collect::<Vec<_>>()))
}

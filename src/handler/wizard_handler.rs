use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;

use crate::service::quote_service::QuoteService;
use crate::util::error::HandlerError;
use crate::wizard::engine::StepInput;
use crate::wizard::session::WizardSessions;

pub struct WizardState {
    pub sessions: Arc<WizardSessions>,
    pub quote_service: Arc<dyn QuoteService>,
}

pub async fn create_wizard_handler(State(state): State<Arc<WizardState>>) -> impl IntoResponse {
    let view = state.sessions.create().await;
    (StatusCode::CREATED, Json(view))
}

pub async fn get_wizard_handler(
    State(state): State<Arc<WizardState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.sessions.view(id).await?))
}

pub async fn advance_wizard_handler(
    State(state): State<Arc<WizardState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<StepInput>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.sessions.advance(id, input).await?))
}

pub async fn retreat_wizard_handler(
    State(state): State<Arc<WizardState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.sessions.retreat(id).await?))
}

pub async fn submit_wizard_handler(
    State(state): State<Arc<WizardState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let view = state.sessions.submit(id, state.quote_service.clone()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn discard_wizard_handler(
    State(state): State<Arc<WizardState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    state.sessions.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::quote_dto::{CompleteQuoteRequest, QuoteResponse, SavingsEstimate, SavingsQuery, StepCheckResponse};
use crate::model::quote::QuoteDraft;
use crate::service::quote_service::QuoteService;
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::quote::{estimate_annual_savings, validate_quote_step};

/// Submit a whole quote in one request.
pub async fn create_quote_handler(
    State(service): State<Arc<dyn QuoteService>>,
    Json(payload): Json<CompleteQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_quote_handler] Handler called");
    let quote = payload.into_complete().map_err(|errors| {
        warn!("[create_quote_handler] Validation failed on {} field(s)", errors.len());
        HandlerError::validation("Quote validation failed", &errors)
    })?;

    let stored = service.submit_quote(quote).await?;
    Ok((StatusCode::CREATED, Json(QuoteResponse::from(stored))))
}

/// Presence check that enables the form's "Next" button.
pub async fn check_step_handler(
    Path(step): Path<u32>,
    Json(draft): Json<QuoteDraft>,
) -> impl IntoResponse {
    let valid = validate_quote_step(step, &draft);
    Json(StepCheckResponse { step, valid })
}

pub async fn estimate_savings_handler(
    Query(query): Query<SavingsQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let bill = query.monthly_bill;
    if !bill.is_finite() || bill < 0.0 {
        return Err(HandlerError::new(
            HandlerErrorKind::BadRequest,
            "monthlyBill must be a non-negative number",
        ));
    }
    Ok(Json(SavingsEstimate {
        monthly_bill: bill,
        annual_savings: estimate_annual_savings(bill * 12.0),
    }))
}

use serde::Serialize;

use crate::dto::quote_dto::QuoteResponse;
use crate::dto::workshop_dto::WorkshopResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_quotes: usize,
    pub pending_quotes: u64,
    pub active_workshops: usize,
}

/// Everything the admin dashboard shows in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub quotes: Vec<QuoteResponse>,
    pub workshops: Vec<WorkshopResponse>,
}

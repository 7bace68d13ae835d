use tracing::{info, instrument};
use crate::dto::dashboard_dto::{DashboardResponse, DashboardSummary};
use crate::dto::quote_dto::QuoteResponse;
use crate::dto::workshop_dto::WorkshopResponse;
use crate::service::quote_service::QuoteService;
use crate::service::workshop_service::WorkshopService;
use crate::util::error::ServiceError;
use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait DashboardService: Send + Sync {
	async fn dashboard(&self) -> Result<DashboardResponse, ServiceError>;
}

pub struct DashboardServiceImpl {
	pub quote_service: Arc<dyn QuoteService>,
	pub workshop_service: Arc<dyn WorkshopService>,
}

impl DashboardServiceImpl {
	pub fn new(quote_service: Arc<dyn QuoteService>, workshop_service: Arc<dyn WorkshopService>) -> Self {
		DashboardServiceImpl { quote_service, workshop_service }
	}
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
	#[instrument(skip(self))]
	async fn dashboard(&self) -> Result<DashboardResponse, ServiceError> {
		info!("Building dashboard");
		let (quotes, pending_quotes, workshops) = tokio::try_join!(
			self.quote_service.list_quotes(),
			self.quote_service.count_pending(),
			self.workshop_service.list_workshops(),
		)?;

		let summary = DashboardSummary {
			total_quotes: quotes.len(),
			pending_quotes,
			active_workshops: workshops.iter().filter(|w| w.is_active()).count(),
		};
		info!(
			total_quotes = summary.total_quotes,
			pending_quotes = summary.pending_quotes,
			active_workshops = summary.active_workshops,
			"Dashboard ready"
		);
		Ok(DashboardResponse {
			summary,
			quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
			workshops: workshops.into_iter().map(WorkshopResponse::from).collect(),
		})
	}
}

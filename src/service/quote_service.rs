use tracing::{info, error, instrument};
use crate::model::quote::{CompleteQuote, StoredQuote, STATUS_PENDING};
use crate::repository::quote_repo::QuoteRepository;
use crate::util::error::ServiceError;
use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Persist a validated quote as a new pending lead. One stored record per call, no retry.
	async fn submit_quote(&self, quote: CompleteQuote) -> Result<StoredQuote, ServiceError>;
	async fn list_quotes(&self) -> Result<Vec<StoredQuote>, ServiceError>;
	async fn count_pending(&self) -> Result<u64, ServiceError>;
}

pub struct QuoteServiceImpl {
	pub quote_repo: Arc<dyn QuoteRepository>,
}

impl QuoteServiceImpl {
	pub fn new(quote_repo: Arc<dyn QuoteRepository>) -> Self {
		QuoteServiceImpl { quote_repo }
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, quote), fields(email = %quote.email))]
	async fn submit_quote(&self, quote: CompleteQuote) -> Result<StoredQuote, ServiceError> {
		info!("Submitting quote");
		let stored = self.quote_repo.create(quote, STATUS_PENDING).await.map_err(|e| {
			error!("Failed to submit quote: {e}");
			ServiceError::from(e)
		})?;

		info!(
			quote_id = %stored.id,
			name = %stored.quote.name,
			email = %stored.quote.email,
			property_type = %stored.quote.property_type,
			energy_bill = stored.quote.energy_bill,
			"New quote received"
		);
		Ok(stored)
	}

	#[instrument(skip(self))]
	async fn list_quotes(&self) -> Result<Vec<StoredQuote>, ServiceError> {
		info!("Listing quotes");
		let res = self.quote_repo.list_recent().await;
		match &res {
			Ok(quotes) => info!("Fetched {} quotes", quotes.len()),
			Err(e) => error!("Failed to list quotes: {e}"),
		}
		res.map_err(ServiceError::from)
	}

	#[instrument(skip(self))]
	async fn count_pending(&self) -> Result<u64, ServiceError> {
		let res = self.quote_repo.count_by_status(STATUS_PENDING).await;
		if let Err(e) = &res {
			error!("Failed to count pending quotes: {e}");
		}
		res.map_err(ServiceError::from)
	}
}

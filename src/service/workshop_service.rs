use tracing::{info, error, instrument};
use crate::model::workshop::Workshop;
use crate::repository::workshop_repo::WorkshopRepository;
use crate::util::error::ServiceError;
use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait WorkshopService: Send + Sync {
	/// Bookable workshops for the public listing, earliest start first.
	async fn list_active_workshops(&self) -> Result<Vec<Workshop>, ServiceError>;
	/// Every workshop regardless of status, earliest start first.
	async fn list_workshops(&self) -> Result<Vec<Workshop>, ServiceError>;
}

pub struct WorkshopServiceImpl {
	pub workshop_repo: Arc<dyn WorkshopRepository>,
}

impl WorkshopServiceImpl {
	pub fn new(workshop_repo: Arc<dyn WorkshopRepository>) -> Self {
		WorkshopServiceImpl { workshop_repo }
	}

	async fn fetch(&self, active_only: bool) -> Result<Vec<Workshop>, ServiceError> {
		let res = self.workshop_repo.list(active_only).await;
		match &res {
			Ok(workshops) => info!("Fetched {} workshops", workshops.len()),
			Err(e) => error!("Failed to list workshops: {e}"),
		}
		res.map_err(ServiceError::from)
	}
}

#[async_trait]
impl WorkshopService for WorkshopServiceImpl {
	#[instrument(skip(self))]
	async fn list_active_workshops(&self) -> Result<Vec<Workshop>, ServiceError> {
		info!("Listing active workshops");
		self.fetch(true).await
	}

	#[instrument(skip(self))]
	async fn list_workshops(&self) -> Result<Vec<Workshop>, ServiceError> {
		info!("Listing all workshops");
		self.fetch(false).await
	}
}

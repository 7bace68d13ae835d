use crate::model::quote::{CompleteQuote, StoredQuote};
use crate::model::workshop::Workshop;
use crate::repository::quote_repo::QuoteRepository;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::timestamp_now;
use crate::repository::workshop_repo::WorkshopRepository;
use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;
use tracing::info;

/// Process-local quote store, used when no MongoDB is configured and in tests.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    quotes: RwLock<Vec<StoredQuote>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn create(&self, quote: CompleteQuote, status: &str) -> RepositoryResult<StoredQuote> {
        let stored = StoredQuote {
            id: ObjectId::new(),
            quote,
            created_at: timestamp_now(),
            status: status.to_string(),
        };
        self.quotes.write().await.push(stored.clone());
        info!(quote_id = %stored.id, "Quote stored in memory");
        Ok(stored)
    }

    async fn list_recent(&self) -> RepositoryResult<Vec<StoredQuote>> {
        let mut quotes = self.quotes.read().await.clone();
        // Later inserts win ties on equal timestamps.
        quotes.reverse();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes)
    }

    async fn count_by_status(&self, status: &str) -> RepositoryResult<u64> {
        let quotes = self.quotes.read().await;
        Ok(quotes.iter().filter(|q| q.status == status).count() as u64)
    }
}

/// Workshop store seeded at construction.
#[derive(Default)]
pub struct InMemoryWorkshopRepository {
    workshops: RwLock<Vec<Workshop>>,
}

impl InMemoryWorkshopRepository {
    pub fn new(workshops: Vec<Workshop>) -> Self {
        InMemoryWorkshopRepository { workshops: RwLock::new(workshops) }
    }

    /// Seed the store from a JSON array of workshops.
    pub async fn from_json_file(path: &str) -> RepositoryResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to read workshops file {}: {}", path, e)))?;
        let workshops: Vec<Workshop> = serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::serialization(format!("Invalid workshops file {}: {}", path, e)))?;
        info!(path, count = workshops.len(), "Workshops loaded into memory");
        Ok(Self::new(workshops))
    }
}

#[async_trait]
impl WorkshopRepository for InMemoryWorkshopRepository {
    async fn list(&self, active_only: bool) -> RepositoryResult<Vec<Workshop>> {
        let mut workshops: Vec<Workshop> = self
            .workshops
            .read()
            .await
            .iter()
            .filter(|w| !active_only || w.is_active())
            .cloned()
            .collect();
        workshops.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(workshops)
    }
}

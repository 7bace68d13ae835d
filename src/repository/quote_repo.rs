use crate::model::quote::{CompleteQuote, StoredQuote};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::{connect_database, timestamp_now};
use crate::config::mongo_conf::MongoConfig;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{info, error};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Insert a quote with the given initial status and return the stored record.
    async fn create(&self, quote: CompleteQuote, status: &str) -> RepositoryResult<StoredQuote>;
    /// All quotes, newest first.
    async fn list_recent(&self) -> RepositoryResult<Vec<StoredQuote>>;
    async fn count_by_status(&self, status: &str) -> RepositoryResult<u64>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<StoredQuote>,
}

impl MongoQuoteRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let db = connect_database(config).await?;
        let collection = db.collection::<StoredQuote>(&config.quote_collection);
        Ok(MongoQuoteRepository { collection })
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(email = %quote.email, status = %status))]
    async fn create(&self, quote: CompleteQuote, status: &str) -> RepositoryResult<StoredQuote> {
        info!("Creating new quote");
        let stored = StoredQuote {
            id: ObjectId::new(),
            quote,
            created_at: timestamp_now(),
            status: status.to_string(),
        };

        match self.collection.insert_one(stored.clone(), None).await {
            Ok(_) => {
                info!(quote_id = %stored.id, "Quote created successfully");
                Ok(stored)
            }
            Err(e) => {
                error!("Failed to create quote: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_recent(&self) -> RepositoryResult<Vec<StoredQuote>> {
        info!("Listing quotes, newest first");
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let mut cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list quotes: {}", e);
            RepositoryError::from(e)
        })?;

        let mut quotes = Vec::new();
        while let Some(quote) = cursor.next().await {
            match quote {
                Ok(q) => quotes.push(q),
                Err(e) => {
                    error!("Failed to deserialize quote: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize quote: {}", e)));
                }
            }
        }
        info!("Fetched {} quotes", quotes.len());
        Ok(quotes)
    }

    #[tracing::instrument(skip(self))]
    async fn count_by_status(&self, status: &str) -> RepositoryResult<u64> {
        self.collection
            .count_documents(doc! { "status": status }, None)
            .await
            .map_err(|e| {
                error!("Failed to count quotes by status: {}", e);
                RepositoryError::from(e)
            })
    }
}

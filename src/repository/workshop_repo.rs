use crate::model::workshop::{Workshop, WORKSHOP_STATUS_ACTIVE};
use crate::repository::connect_database;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::config::mongo_conf::MongoConfig;
use async_trait::async_trait;
use bson::doc;
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{info, error};

#[async_trait]
pub trait WorkshopRepository: Send + Sync {
    /// Workshops ordered by start date, earliest first.
    async fn list(&self, active_only: bool) -> RepositoryResult<Vec<Workshop>>;
}

pub struct MongoWorkshopRepository {
    collection: mongodb::Collection<Workshop>,
}

impl MongoWorkshopRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let db = connect_database(config).await?;
        let collection = db.collection::<Workshop>(&config.workshop_collection);
        Ok(MongoWorkshopRepository { collection })
    }
}

#[async_trait]
impl WorkshopRepository for MongoWorkshopRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self, active_only: bool) -> RepositoryResult<Vec<Workshop>> {
        info!("Listing workshops by start date");
        let filter = active_only.then(|| doc! { "status": WORKSHOP_STATUS_ACTIVE });
        let options = FindOptions::builder().sort(doc! { "startDate": 1 }).build();
        let mut cursor = self.collection.find(filter, options).await.map_err(|e| {
            error!("Failed to list workshops: {}", e);
            RepositoryError::from(e)
        })?;

        let mut workshops = Vec::new();
        while let Some(workshop) = cursor.next().await {
            match workshop {
                Ok(w) => workshops.push(w),
                Err(e) => {
                    error!("Failed to deserialize workshop: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize workshop: {}", e)));
                }
            }
        }
        info!("Fetched {} workshops", workshops.len());
        Ok(workshops)
    }
}

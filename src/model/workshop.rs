use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const WORKSHOP_STATUS_ACTIVE: &str = "active";

/// Workshop as stored by staff. Read-only from this service's point of view.
///
/// Seed files may omit `_id`; a fresh one is generated on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    #[serde(rename = "_id", default = "ObjectId::new")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub price: f64,
    pub max_participants: u32,
    pub start_date: String,
    pub end_date: String,
    pub image_url: Option<String>,
    pub status: String,
}

impl Workshop {
    /// Only active workshops can be booked.
    pub fn is_active(&self) -> bool {
        self.status == WORKSHOP_STATUS_ACTIVE
    }
}

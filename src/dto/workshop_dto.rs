use serde::Serialize;

use crate::model::workshop::Workshop;

/// A workshop as returned over HTTP, with its id as a hex string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopResponse {
    pub id: String,
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

impl From<Workshop> for WorkshopResponse {
    fn from(w: Workshop) -> Self {
        WorkshopResponse {
            id: w.id.to_hex(),
            title: w.title,
            description: w.description,
            instructor: w.instructor,
            duration: w.duration,
            price: w.price,
            max_participants: w.max_participants,
            start_date: w.start_date,
            end_date: w.end_date,
            image_url: w.image_url,
            status: w.status,
        }
    }
}

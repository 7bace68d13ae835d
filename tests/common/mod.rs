#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::to_bytes, body::Body, http::{Request, StatusCode}, Router};
use bson::oid::ObjectId;
use serde_json::{json, Value};
use solar_quote_backend::app::{create_router, AppServices};
use solar_quote_backend::config::JwtConfig;
use solar_quote_backend::dto::quote_dto::{EnergyInfoRequest, PersonalInfoRequest, PropertyInfoRequest};
use solar_quote_backend::model::quote::{CompleteQuote, PropertyType, RoofType, StoredQuote, Timeline};
use solar_quote_backend::model::workshop::Workshop;
use solar_quote_backend::repository::memory_repo::{InMemoryQuoteRepository, InMemoryWorkshopRepository};
use solar_quote_backend::repository::quote_repo::QuoteRepository;
use solar_quote_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use solar_quote_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use solar_quote_backend::wizard::StepInput;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Quote store that rejects the first `failures` inserts.
pub struct FlakyQuoteRepository {
    inner: InMemoryQuoteRepository,
    failures: AtomicUsize,
}

impl FlakyQuoteRepository {
    pub fn new(failures: usize) -> Self {
        FlakyQuoteRepository { inner: InMemoryQuoteRepository::new(), failures: AtomicUsize::new(failures) }
    }
}

#[async_trait]
impl QuoteRepository for FlakyQuoteRepository {
    async fn create(&self, quote: CompleteQuote, status: &str) -> RepositoryResult<StoredQuote> {
        let left = self.failures.load(Ordering::SeqCst);
        if left > 0 {
            self.failures.store(left - 1, Ordering::SeqCst);
            return Err(RepositoryError::connection("connection refused"));
        }
        self.inner.create(quote, status).await
    }

    async fn list_recent(&self) -> RepositoryResult<Vec<StoredQuote>> {
        self.inner.list_recent().await
    }

    async fn count_by_status(&self, status: &str) -> RepositoryResult<u64> {
        self.inner.count_by_status(status).await
    }
}

/// Quote store whose inserts take `delay`; the first `failures` of them fail.
pub struct SlowQuoteRepository {
    inner: FlakyQuoteRepository,
    delay: Duration,
}

impl SlowQuoteRepository {
    pub fn new(delay: Duration, failures: usize) -> Self {
        SlowQuoteRepository { inner: FlakyQuoteRepository::new(failures), delay }
    }
}

#[async_trait]
impl QuoteRepository for SlowQuoteRepository {
    async fn create(&self, quote: CompleteQuote, status: &str) -> RepositoryResult<StoredQuote> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(quote, status).await
    }

    async fn list_recent(&self) -> RepositoryResult<Vec<StoredQuote>> {
        self.inner.list_recent().await
    }

    async fn count_by_status(&self, status: &str) -> RepositoryResult<u64> {
        self.inner.count_by_status(status).await
    }
}

pub fn jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

pub fn token_for(role: &str) -> String {
    jwt_utils()
        .generate_access_token("user-1", &format!("{}@example.com", role), role)
        .expect("token")
}

pub fn workshop(title: &str, start_date: &str, status: &str) -> Workshop {
    Workshop {
        id: ObjectId::new(),
        title: title.to_string(),
        description: "Learn how rooftop systems are installed".to_string(),
        instructor: "Sam Rivera".to_string(),
        duration: "2 days".to_string(),
        price: 299.0,
        max_participants: 15,
        start_date: start_date.to_string(),
        end_date: start_date.to_string(),
        image_url: None,
        status: status.to_string(),
    }
}

pub fn sample_workshops() -> Vec<Workshop> {
    vec![
        workshop("Battery Storage", "2026-12-05", "active"),
        workshop("Solar Basics", "2026-11-02", "active"),
        workshop("Old Session", "2026-01-10", "inactive"),
    ]
}

pub fn complete_quote() -> CompleteQuote {
    CompleteQuote {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "5551234567".to_string(),
        address: "12 Solar Way".to_string(),
        property_type: PropertyType::House,
        roof_type: RoofType::Tile,
        energy_bill: 150.0,
        timeline: Timeline::ThreeMonths,
        additional_info: Some("South-facing roof".to_string()),
    }
}

pub fn complete_quote_json() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "5551234567",
        "address": "12 Solar Way",
        "propertyType": "house",
        "roofType": "tile",
        "energyBill": 150,
        "timeline": "3_months",
        "additionalInfo": "South-facing roof"
    })
}

/// Inputs that take a fresh wizard to the review step.
pub fn review_inputs() -> Vec<StepInput> {
    vec![
        StepInput::PersonalInfo(PersonalInfoRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "5551234567".to_string(),
        }),
        StepInput::PropertyInfo(PropertyInfoRequest {
            address: "12 Solar Way".to_string(),
            property_type: "house".to_string(),
            roof_type: "tile".to_string(),
        }),
        StepInput::EnergyInfo(EnergyInfoRequest {
            energy_bill: Some(100.0),
            timeline: "immediate".to_string(),
            additional_info: None,
        }),
    ]
}

pub fn review_inputs_json() -> Vec<Value> {
    review_inputs().iter().map(|input| serde_json::to_value(input).unwrap()).collect()
}

/// Create a wizard over HTTP and walk it to the review step.
pub async fn wizard_at_review(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/wizard", None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();
    for input in review_inputs_json() {
        let (status, _) = send(app, "POST", &format!("/wizard/{}/advance", id), Some(input), None).await;
        assert_eq!(status, StatusCode::OK);
    }
    id
}

pub fn services_with(quote_repo: Arc<dyn QuoteRepository>) -> AppServices {
    AppServices::new(
        quote_repo,
        Arc::new(InMemoryWorkshopRepository::new(sample_workshops())),
        Arc::new(jwt_utils()),
    )
}

pub fn setup_app() -> Router {
    create_router(&services_with(Arc::new(InMemoryQuoteRepository::new())))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body_bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).to_string()))
    };
    (status, value)
}

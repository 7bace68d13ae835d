mod common;

use axum::http::StatusCode;
use common::{complete_quote_json, send, services_with, setup_app, wizard_at_review, FlakyQuoteRepository, SlowQuoteRepository};
use serde_json::json;
use solar_quote_backend::app::create_router;
use solar_quote_backend::repository::quote_repo::QuoteRepository;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_health() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn test_create_quote_handler() {
    let app = setup_app();
    let (status, body) = send(&app, "POST", "/quotes", Some(complete_quote_json()), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["propertyType"], "house");
    assert_eq!(body["timeline"], "3_months");
    assert_eq!(body["id"].as_str().map(str::len), Some(24));
    assert!(body.get("_id").is_none());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_quote_handler_reports_field_errors() {
    let app = setup_app();
    let mut payload = complete_quote_json();
    payload["name"] = json!("J");
    payload["roofType"] = json!("straw");
    let (status, body) = send(&app, "POST", "/quotes", Some(payload), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation");
    assert_eq!(
        body["details"],
        json!([
            { "field": "name", "message": "Name must be at least 2 characters" },
            { "field": "roofType", "message": "Please select a roof type" }
        ])
    );
}

#[tokio::test]
async fn test_create_quote_handler_persistence_failure() {
    let app = create_router(&services_with(Arc::new(FlakyQuoteRepository::new(1))));
    let (status, body) = send(&app, "POST", "/quotes", Some(complete_quote_json()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal");
}

#[tokio::test]
async fn test_check_step_handler() {
    let app = setup_app();
    let draft = json!({ "name": "Jane", "email": "jane@example.com", "phone": "5551234567" });
    let (status, body) = send(&app, "POST", "/quotes/steps/1/check", Some(draft.clone()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "step": 1, "valid": true }));

    let (_, body) = send(&app, "POST", "/quotes/steps/99/check", Some(draft), None).await;
    assert_eq!(body["valid"], false);

    let energy = json!({ "energyBill": 0, "timeline": "" });
    let (_, body) = send(&app, "POST", "/quotes/steps/3/check", Some(energy), None).await;
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn test_estimate_savings_handler() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/quotes/estimate?monthlyBill=100", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["annualSavings"], 840);

    let (status, _) = send(&app, "GET", "/quotes/estimate?monthlyBill=-1", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_workshops_are_active_and_ordered() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/workshops", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body[0]["id"].is_string());
    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|w| w["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Solar Basics", "Battery Storage"]);
}

#[tokio::test]
async fn test_wizard_flow_over_http() {
    let app = setup_app();
    let (status, body) = send(&app, "POST", "/wizard", None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["step"], "personal_info");
    assert_eq!(body["title"], "Personal Information");
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "POST", &format!("/wizard/{}/retreat", id), None, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let personal = json!({ "step": "personal_info", "name": "Jane Doe", "email": "jane@example.com", "phone": "5551234567" });
    let (status, body) = send(&app, "POST", &format!("/wizard/{}/advance", id), Some(personal), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "property_info");
    assert_eq!(body["progress"], 50);

    let bad_property = json!({ "step": "property_info", "address": "12", "propertyType": "house", "roofType": "tile" });
    let (status, body) = send(&app, "POST", &format!("/wizard/{}/advance", id), Some(bad_property), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "address");

    let property = json!({ "step": "property_info", "address": "12 Solar Way", "propertyType": "house", "roofType": "tile" });
    send(&app, "POST", &format!("/wizard/{}/advance", id), Some(property), None).await;
    let energy = json!({ "step": "energy_info", "energyBill": 100, "timeline": "immediate" });
    let (_, body) = send(&app, "POST", &format!("/wizard/{}/advance", id), Some(energy), None).await;
    assert_eq!(body["step"], "review");
    assert_eq!(body["review"]["timeline"], "As soon as possible");
    assert_eq!(body["review"]["estimatedAnnualSavings"], 840);

    let (status, body) = send(&app, "POST", &format!("/wizard/{}/submit", id), None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["step"], "submitted");
    assert_eq!(body["submittedQuote"]["status"], "pending");
    assert!(body["submittedQuote"]["id"].is_string());

    let (status, _) = send(&app, "POST", &format!("/wizard/{}/submit", id), None, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "DELETE", &format!("/wizard/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/wizard/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wizard_submit_failure_stays_on_review() {
    let app = create_router(&services_with(Arc::new(FlakyQuoteRepository::new(1))));
    let (_, body) = send(&app, "POST", "/wizard", None, None).await;
    let id = body["id"].as_str().unwrap().to_string();

    for step in [
        json!({ "step": "personal_info", "name": "Jane Doe", "email": "jane@example.com", "phone": "5551234567" }),
        json!({ "step": "property_info", "address": "12 Solar Way", "propertyType": "apartment", "roofType": "flat" }),
        json!({ "step": "energy_info", "energyBill": 80.5, "timeline": "12_months" }),
    ] {
        let (status, _) = send(&app, "POST", &format!("/wizard/{}/advance", id), Some(step), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "POST", &format!("/wizard/{}/submit", id), None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to submit quote: connection refused");

    let (_, body) = send(&app, "GET", &format!("/wizard/{}", id), None, None).await;
    assert_eq!(body["step"], "review");
    assert_eq!(body["draft"]["propertyType"], "apartment");

    let (status, _) = send(&app, "POST", &format!("/wizard/{}/submit", id), None, None).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_wizard_accepts_one_submission_at_a_time() {
    let repo = Arc::new(SlowQuoteRepository::new(Duration::from_millis(200), 0));
    let app = create_router(&services_with(repo.clone()));
    let id = wizard_at_review(&app).await;
    let uri = format!("/wizard/{}/submit", id);

    let (first, second) = tokio::join!(send(&app, "POST", &uri, None, None), send(&app, "POST", &uri, None, None));
    let statuses = [first.0, second.0];
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(), 1);
    assert_eq!(repo.list_recent().await.unwrap().len(), 1);

    let (_, body) = send(&app, "GET", &format!("/wizard/{}", id), None, None).await;
    assert_eq!(body["step"], "submitted");
    assert_eq!(body["submitting"], false);
}

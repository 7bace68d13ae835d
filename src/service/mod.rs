pub mod dashboard_service;
pub mod quote_service;
pub mod workshop_service;

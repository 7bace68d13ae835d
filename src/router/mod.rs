pub mod dashboard_router;
pub mod quote_router;
pub mod wizard_router;
pub mod workshop_router;

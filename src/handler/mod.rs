pub mod dashboard_handler;
pub mod quote_handler;
pub mod wizard_handler;
pub mod workshop_handler;

pub mod dashboard_dto;
pub mod quote_dto;
pub mod workshop_dto;

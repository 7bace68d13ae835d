pub mod quote;
pub mod user;
pub mod workshop;

pub mod auth;
pub mod dashboard;
pub mod requests;
pub mod sections;

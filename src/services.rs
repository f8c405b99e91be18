pub mod auth;
pub mod dashboard_service;
pub mod request_service;
pub mod section_service;

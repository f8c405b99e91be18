//! Portal interno da loja de móveis: pedidos de instalação e entrega,
//! atribuição por papel e páginas fixas de relatório.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::{AppConfig, AppState};
pub use routes::{build_router, PortalApp};

pub mod user_repo;
pub use user_repo::{PgUserRepository, UserRepository};
pub mod request_repo;
pub use request_repo::{PgRequestRepository, RequestRepository};
#[cfg(any(test, feature = "test-support"))]
pub mod memory_repo;
#[cfg(any(test, feature = "test-support"))]
pub use memory_repo::MemoryStore;

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::AppConfig;

// Conecta ao banco de dados, usando '?' para propagar erros
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;
use sqlx::PgPool;

use crate::{
    db::{PgRequestRepository, PgUserRepository, RequestRepository, UserRepository},
    services::{
        auth::AuthService, dashboard_service::DashboardService, request_service::RequestService,
        section_service::SectionCatalog,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_HOURS: u32 = 24 * 7;
// Uma sessão dura no máximo um ano
pub const MAX_SESSION_TTL_HOURS: u32 = 24 * 366;

// Configuração lida das variáveis de ambiente (.env incluído)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub session_ttl_hours: u32,
    pub bcrypt_cost: u32,
    pub sections_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca (facilita os testes).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{raw}'"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let session_ttl_hours = match lookup("SESSION_TTL_HOURS") {
            Some(raw) => {
                let hours = raw
                    .parse::<u32>()
                    .with_context(|| format!("SESSION_TTL_HOURS inválido: '{raw}'"))?;
                if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
                    anyhow::bail!(
                        "SESSION_TTL_HOURS fora do intervalo 1..={MAX_SESSION_TTL_HOURS}: '{raw}'"
                    );
                }
                hours
            }
            None => DEFAULT_SESSION_TTL_HOURS,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("BCRYPT_COST inválido: '{raw}'"))?,
            None => bcrypt::DEFAULT_COST,
        };

        let sections_path = lookup("SECTIONS_PATH").map(PathBuf::from);

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
            session_ttl_hours,
            bcrypt_cost,
            sections_path,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub request_service: RequestService,
    pub dashboard_service: DashboardService,
    pub section_catalog: Arc<SectionCatalog>,
}

impl AppState {
    /// Estado de produção, sobre o pool do Postgres.
    pub fn postgres(pool: PgPool, config: &AppConfig) -> anyhow::Result<Self> {
        let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
        let request_repo = Arc::new(PgRequestRepository::new(pool));
        Self::from_repositories(user_repo, request_repo, config)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_repositories(
        user_repo: Arc<dyn UserRepository>,
        request_repo: Arc<dyn RequestRepository>,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let section_catalog = match &config.sections_path {
            Some(path) => SectionCatalog::from_file(path)?,
            None => SectionCatalog::embedded()?,
        };

        let auth_service = AuthService::new(
            user_repo,
            config.jwt_secret.clone(),
            config.session_ttl_hours,
            config.bcrypt_cost,
        );
        let request_service = RequestService::new(request_repo.clone());
        let dashboard_service = DashboardService::new(request_repo);

        Ok(Self {
            auth_service,
            request_service,
            dashboard_service,
            section_catalog: Arc::new(section_catalog),
        })
    }
}

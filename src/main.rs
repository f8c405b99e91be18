//src/main.rs

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use furniture_portal::{build_router, db, models::auth::Role, AppConfig, AppState};

/// Portal interno: pedidos de instalação e entrega.
#[derive(Parser, Debug)]
#[command(name = "furniture-portal", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sobe o servidor HTTP (padrão).
    Serve,
    /// Cadastra um funcionário.
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// owner, manager, installer ou delivery
        #[arg(long)]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger antes de tudo
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("furniture_portal=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env()?;

    let pool = db::connect(&config)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app_state = AppState::postgres(pool, &config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(app_state, &config.bind_addr).await,
        Commands::CreateUser { username, password, role } => {
            let user = app_state
                .auth_service
                .create_user(&username, &password, role)
                .await
                .with_context(|| format!("Falha ao criar o usuário '{username}'"))?;
            println!("{} ({}) criado com id {}", user.username, user.role, user.id);
            Ok(())
        }
    }
}

async fn serve(app_state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = build_router(app_state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {addr}"))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .context("Erro no servidor Axum")?;
    Ok(())
}

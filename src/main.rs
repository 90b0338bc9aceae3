use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use profile_api::auth::TokenKeys;
use profile_api::config;
use profile_api::database::{DatabaseManager, PgUserRepository};
use profile_api::server::{self, AppState};

#[derive(Parser)]
#[command(name = "profile-api", version, about = "User profile API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Bind address, overrides SERVER_HOST")]
        host: Option<String>,
        #[arg(long, help = "Bind port, overrides SERVER_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Print a signed bearer token for local development")]
    Token {
        #[arg(long, help = "Principal user id")]
        user_id: i64,
        #[arg(long, default_value = "developer")]
        username: String,
        #[arg(long, default_value = "user")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("profile_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => serve(host, port).await,
        Command::Token { user_id, username, role } => {
            let config = config::config();
            let keys = TokenKeys::from_secret(&config.security.jwt_secret)?;
            let token = keys.issue(user_id, username, role, config.security.jwt_expiry_hours)?;
            println!("{}", token);
            Ok(())
        }
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting Profile API in {:?} mode", config.environment);

    let tokens = TokenKeys::from_secret(&config.security.jwt_secret)
        .context("JWT_SECRET must be set")?;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        users: Arc::new(PgUserRepository::from_config(pool.clone(), &config.database)),
        tokens: Arc::new(tokens),
        expose_error_details: config.api.expose_error_details,
    };
    if state.expose_error_details {
        tracing::warn!("Raw infrastructure errors will be sent to clients");
    }

    let app = server::app_with_cors(state, &config.security);

    let bind_addr = format!(
        "{}:{}",
        host.unwrap_or_else(|| config.server.host.clone()),
        port.unwrap_or(config.server.port)
    );
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Profile API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(pool).await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

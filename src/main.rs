// src/main.rs

use std::env;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use solana_mcp_server::{
    api::create_router,
    blockchain::SolanaRpcClient,
    config::{Config, TransportMode},
    mcp::transport::run_stdio,
    AppState,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 HTTP Server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn fatal(message: &str, err: impl std::fmt::Display) -> ! {
    error!("❌ {}: {}", message, err);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solana_mcp_server=info,solana_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => fatal("Failed to load configuration", format!("{:#}", e)),
    };
    if env::args().any(|arg| arg == "--http") {
        config.transport = TransportMode::Http;
    }

    let rpc_client = SolanaRpcClient::new(&config.rpc_url, config.commitment);
    info!(
        "Using Solana RPC {} (commitment: {:?})",
        rpc_client.rpc_url(),
        rpc_client.commitment().commitment
    );

    let transport = config.transport;
    let app_state = AppState::new(config, Arc::new(rpc_client));

    let result = match transport {
        TransportMode::Stdio => run_stdio(app_state).await.map_err(anyhow::Error::from),
        TransportMode::Http => run_http_server(app_state).await,
    };

    if let Err(e) = result {
        fatal("Fatal error in main()", format!("{:#}", e));
    }
}

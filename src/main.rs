use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use leave_engine::repository::InMemoryLeaveRepository;
use leave_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "leave-engine",
    about = "Serve the leave engine HTTP API",
    version
)]
struct Cli {
    /// Directory containing policy.yaml
    #[arg(long, default_value = "./config/clt")]
    config: PathBuf,
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;

    let config = ConfigLoader::load(&cli.config)?;
    info!(
        policy = %config.metadata().code,
        version = %config.metadata().version,
        "Loaded leave policy"
    );

    let state = AppState::new(config, Arc::new(InMemoryLeaveRepository::new()));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Leave engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roomsched::config::Config;
use roomsched::engine::Engine;
use roomsched::{server, session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so console sessions keep stdout to themselves.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    roomsched::observability::init(config.metrics_port)?;

    let engine = Arc::new(Engine::new(config.engine));
    info!("  overlap policy: {:?}", engine.config().overlap);
    info!("  capacity check: {:?}", engine.config().capacity);

    match config.bind {
        Some(addr) => {
            let listener = TcpListener::bind(&addr).await?;
            info!("roomsched listening on {addr}");
            info!("  max_connections: {}", config.max_connections);
            server::serve(listener, engine, config.max_connections, server::shutdown_signal()).await;
        }
        None => {
            session::run_session(tokio::io::stdin(), tokio::io::stdout(), engine).await?;
        }
    }

    info!("roomsched stopped");
    Ok(())
}

use tokio::net::TcpListener;
use todo_server::config::Config;
use todo_server::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, database = ?config.database, "listening");
    todo_server::run(listener, state).await?;
    Ok(())
}

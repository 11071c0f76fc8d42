use clap::Parser;
use tinylink_server::{App, AppState, Config};
use tinylink_storage::{bootstrap, StorageConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let storage = StorageConfig {
        database_url: config.database_url.clone(),
        sqlite_path: config.database_path.clone(),
    };
    let (store, activation) = bootstrap(&storage).await?;
    info!(backend = ?activation, "storage ready");

    let base_url = config.effective_base_url();
    let app = App::router(AppState::new(store, &base_url));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(listen_addr = %listener.local_addr()?, base_url = %base_url, "starting tinylink server");
    axum::serve(listener, app).await?;

    Ok(())
}

use chrono::Utc;
use dog_backdrop::{
    router, session::Session, spawn_refresh_loop, AppState, Config, Dataset, DogApiProvider,
    RefreshController,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let provider = DogApiProvider::new(&config.provider_url, config.fetch_timeout)?;
    info!(provider = provider.url(), "using backdrop provider");

    let controller = Arc::new(RefreshController::new(
        Arc::new(provider),
        config.refresh_interval,
    ));
    let dataset = match Dataset::load(&config.dataset_path) {
        Ok(dataset) => {
            info!(path = %config.dataset_path.display(), countries = dataset.len(), "dataset loaded");
            Some(dataset)
        }
        Err(err) => {
            warn!(path = %config.dataset_path.display(), "dataset unavailable: {err}");
            None
        }
    };
    let state = AppState::new(Session::default(), dataset, config.poll_tick);
    let refresh_loop = spawn_refresh_loop(
        controller,
        Arc::clone(&state.session),
        config.poll_tick,
        Utc::now,
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh_loop.abort();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use travel_survey::config::AppConfig;
use travel_survey::db::TripStore;
use travel_survey::error::AppError;
use travel_survey::routes::create_router;
use travel_survey::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let store = TripStore::new(&config.database_path);

    if let Err(err) = store.bootstrap().await {
        error!("preparing trip store failed: {err:?}");
        return Err(err);
    }

    let app = create_router(AppState::new(store));

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,travel_survey=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("installing Ctrl+C handler failed: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

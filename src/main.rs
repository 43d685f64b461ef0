use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use travel_admin::{
    config::AppConfig,
    error::AppError,
    panel::AdminPanel,
    routes::create_router,
    services::{
        client::{ApiClient, ReqwestTransport},
        notifier::Notifier,
        travel_api::TravelApi,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let http = reqwest::Client::builder()
        .build()
        .map_err(|err| AppError::Other(err.into()))?;
    let client = ApiClient::new(
        config.api_root.clone(),
        Arc::new(ReqwestTransport::new(http)),
    );
    let panel = AdminPanel::new(
        TravelApi::new(client),
        Notifier::new(config.notification_ttl),
    );
    // a down backend only shows up as a toast
    if let Err(err) = panel.load_travels().await {
        warn!("Initial travel load failed: {err}");
    }

    let state = AppState::new(config.clone(), panel);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    info!("travel API at {}", config.api_root);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,travel_admin=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

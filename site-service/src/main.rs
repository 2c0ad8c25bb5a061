use anyhow::Context;
use common::{AppConfig, Backends};
use site_service::{create_router, AppState, SERVICE_NAME};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::load_with_service(SERVICE_NAME).with_port_from_env(DEFAULT_PORT);
    let backends = Backends::from_config(&config).context("failed to build backends")?;

    let addr = config.bind_address();
    let app = create_router(AppState::new(config, backends));

    info!(service = SERVICE_NAME, address = %addr, "starting site service");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

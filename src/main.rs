use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wfs3_server::{app::build_router, catalog::Catalog, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "wfs3_server=debug,tower_http=debug,axum::rejection=trace".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let catalog = match &config.catalog_path {
        Some(path) => {
            let catalog = Catalog::load(path)?;
            tracing::info!("Catalog loaded from {}", path);
            catalog
        }
        None => {
            tracing::warn!("No catalog_path configured, serving an empty catalog");
            Catalog::new()
        }
    };

    tracing::info!("Starting WFS3 server on {}:{}", config.host, config.port);

    let app = build_router(config.clone(), Arc::new(catalog));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

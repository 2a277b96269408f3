use std::sync::Arc;

use anyhow::Context;

use catalog_api::app::{AppServices, build_app};
use catalog_api::config::ApiConfig;
use catalog_infra::CatalogSeed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    catalog_observability::init(config.log_format);

    let seed = match &config.seed_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read seed file {}", path.display()))?;
            Some(CatalogSeed::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))?)
        }
        None => {
            tracing::warn!("CATALOG_SEED_FILE not set; starting with an empty catalog");
            None
        }
    };

    let services = AppServices::from_env_settings(config.listing.clone(), seed)?;
    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

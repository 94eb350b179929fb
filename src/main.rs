//! Storefront Catalog - category navigation service for the storefront UI

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_catalog::{api, remote::HttpCatalogClient, CategoryStore, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let client = Arc::new(HttpCatalogClient::new(&config)?);
    let store = Arc::new(CategoryStore::new(client.clone()));
    let categories = store.list().await;
    tracing::info!(count = categories.len(), source = ?store.snapshot().source, "category tree loaded");

    let state = api::AppState {
        store,
        products: client,
        product_fetch_limit: config.product_fetch_limit,
        product_max_pages: config.product_max_pages,
    };
    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(%addr, upstream = %config.catalog_api_url, "storefront catalog listening");
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}

//! Command implementations behind the `city-deals` binary.

pub mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use futures::StreamExt;
use tracing::info;

use crate::catalog::{self, detail::fetch_product_document};
use crate::client::DealsClient;
use crate::orchestrator::{self, ScrapeOptions};
use output::{open_sink, OutputFormat};

#[derive(Debug, Clone, Default)]
pub struct ScrapeCommandConfig {
    pub options: ScrapeOptions,
    pub format: OutputFormat,
    pub out_path: Option<PathBuf>,
}

pub async fn run_cities(client: &DealsClient, format: OutputFormat) -> Result<()> {
    let cities = catalog::list_cities(client).await.context("list cities")?;
    let mut sink = open_sink(format, None)?;
    for city in &cities {
        sink.write(city)?;
    }
    sink.finish()
}

pub async fn run_products(client: &DealsClient, city_id: &str) -> Result<()> {
    let ids = catalog::product_ids_for_city(client, city_id)
        .await
        .with_context(|| format!("list products for city {city_id}"))?;
    info!(city_id, count = ids.len(), "{} products found", ids.len());
    let mut sink = open_sink(OutputFormat::Ndjson, None)?;
    for id in &ids {
        sink.write(id)?;
    }
    sink.finish()
}

pub async fn run_detail(client: &DealsClient, product_id: &str, raw: bool) -> Result<()> {
    let mut sink = open_sink(OutputFormat::Json, None)?;
    if raw {
        let doc = fetch_product_document(client, product_id)
            .await
            .with_context(|| format!("fetch product {product_id}"))?;
        sink.write(&doc)?;
    } else {
        let record = catalog::product_info(client, product_id)
            .await
            .with_context(|| format!("fetch product {product_id}"))?;
        sink.write(&record)?;
    }
    sink.finish()
}

/// Run the whole pipeline, writing each record as soon as it is normalized.
pub async fn run_scrape(client: &DealsClient, cfg: ScrapeCommandConfig) -> Result<()> {
    let stream = orchestrator::deals(client, &cfg.options)
        .await
        .context("collect product ids")?;
    let mut stream = std::pin::pin!(stream);
    let mut sink = open_sink(cfg.format, cfg.out_path.as_deref())?;

    let mut written = 0usize;
    while let Some(record) = stream.next().await {
        let record = record.context("fetch product detail")?;
        sink.write(&record)?;
        written += 1;
    }
    sink.finish()?;
    info!(written, "scrape finished");
    Ok(())
}

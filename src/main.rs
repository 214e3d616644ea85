use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use city_deals::cli::{self, output::OutputFormat, ScrapeCommandConfig};
use city_deals::client::DealsClient;
use city_deals::config::DealsConfig;
use city_deals::orchestrator::ScrapeOptions;
use city_deals::util::env;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "city-deals", version, about = "Scrape city deals into flat records")]
struct Cli {
    /// Override the API root (default: env DEALS_BASE_URL or the public API)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Catalog page size
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Stop each city's catalog walk after this many pages
    #[arg(long, global = true)]
    max_pages: Option<u32>,
    /// Per-request timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// List every city with its boutique context id
    Cities {
        #[arg(long, value_enum, default_value_t = OutputFormat::Ndjson)]
        format: OutputFormat,
    },
    /// List product ids for one city
    Products {
        /// Boutique context id of the city
        #[arg(long)]
        city: String,
    },
    /// Fetch and normalize a single product
    Detail {
        product_id: String,
        /// Print the untouched API document instead
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// Run the full pipeline over all cities
    Scrape {
        /// Only scrape the city with this name
        #[arg(long)]
        city_name: Option<String>,
        /// Stop after this many products
        #[arg(long)]
        limit: Option<usize>,
        /// Log and skip products that fail instead of aborting
        #[arg(long, default_value_t = false)]
        continue_on_error: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Ndjson)]
        format: OutputFormat,
        /// Write records here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Cli {
    fn deals_config(&self) -> DealsConfig {
        let mut cfg = DealsConfig::from_env();
        if let Some(v) = &self.base_url {
            cfg.base_url = v.clone();
        }
        if let Some(v) = self.page_size {
            cfg.page_size = v;
        }
        if self.max_pages.is_some() {
            cfg.max_pages = self.max_pages;
        }
        if self.timeout_secs.is_some() {
            cfg.timeout_secs = self.timeout_secs;
        }
        cfg
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env::init_env();
    city_deals::tracing::init_tracing("info")?;

    let cli = Cli::parse();
    let cfg = cli.deals_config();
    info!(base_url = %cfg.base_url, page_size = cfg.page_size, "city-deals starting");
    let client = DealsClient::new(cfg).context("build http client")?;

    match cli.command {
        Commands::Cities { format } => cli::run_cities(&client, format).await,
        Commands::Products { city } => cli::run_products(&client, &city).await,
        Commands::Detail { product_id, raw } => cli::run_detail(&client, &product_id, raw).await,
        Commands::Scrape {
            city_name,
            limit,
            continue_on_error,
            format,
            out,
        } => {
            let cfg = ScrapeCommandConfig {
                options: ScrapeOptions {
                    city_name,
                    limit,
                    continue_on_error,
                },
                format,
                out_path: out,
            };
            cli::run_scrape(&client, cfg).await
        }
    }
}

//! Driver: cities → per-city product ids → normalized deals, strictly in sequence.

use futures::{stream, Stream, StreamExt};
use tracing::{info, warn};

use crate::catalog::{list_cities, product_ids_for_city, product_info, City};
use crate::client::DealsClient;
use crate::error::Result;
use crate::normalization::deal::DealRecord;

#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Only walk cities whose name matches (case-insensitive).
    pub city_name: Option<String>,
    /// Stop after this many product ids.
    pub limit: Option<usize>,
    /// Log and skip products whose detail fetch fails instead of yielding the error.
    pub continue_on_error: bool,
}

fn city_selected(city: &City, wanted: Option<&str>) -> bool {
    wanted.map_or(true, |name| city.name.trim().eq_ignore_ascii_case(name.trim()))
}

/// Every product id across all (selected) cities, city by city in API order.
pub async fn scrape_product_ids(client: &DealsClient, opts: &ScrapeOptions) -> Result<Vec<String>> {
    let cities = list_cities(client).await?;
    let mut products = Vec::new();

    for city in cities
        .iter()
        .filter(|c| city_selected(c, opts.city_name.as_deref()))
    {
        info!(city = %city.name, "Searching products in \"{}\"", city.name);
        let ids = product_ids_for_city(client, &city.context_id.to_string()).await?;
        info!(city = %city.name, count = ids.len(), "{} products found in {}", ids.len(), city.name);
        products.extend(ids);

        if opts.limit.is_some_and(|limit| products.len() >= limit) {
            break;
        }
    }

    if let Some(limit) = opts.limit {
        products.truncate(limit);
    }
    info!(total = products.len(), "Total: {} products found", products.len());
    Ok(products)
}

/// Detail records for `ids`, fetched one at a time as the stream is polled.
pub fn deal_stream(
    client: DealsClient,
    ids: Vec<String>,
    continue_on_error: bool,
) -> impl Stream<Item = Result<DealRecord>> {
    let total = ids.len();
    stream::iter(ids.into_iter().enumerate())
        .then(move |(idx, id)| {
            let client = client.clone();
            async move {
                info!(product_id = %id, "[{}/{}] fetching product", idx + 1, total);
                let res = product_info(&client, &id).await;
                (id, res)
            }
        })
        .filter_map(move |(id, res)| async move {
            match res {
                Ok(record) => Some(Ok(record)),
                Err(e) if continue_on_error => {
                    warn!(product_id = %id, error = %e, "skipping product");
                    None
                }
                Err(e) => Some(Err(e)),
            }
        })
}

/// Full pipeline: collect ids up front, then stream normalized deals.
pub async fn deals(
    client: &DealsClient,
    opts: &ScrapeOptions,
) -> Result<impl Stream<Item = Result<DealRecord>>> {
    let ids = scrape_product_ids(client, opts).await?;
    Ok(deal_stream(client.clone(), ids, opts.continue_on_error))
}

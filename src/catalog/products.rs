use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{is_truthy, ApiId, Envelope};
use crate::client::DealsClient;
use crate::error::Result;

pub const CATALOG_PATH: &str = "v3.4/catalog/products";

#[derive(Debug, Deserialize)]
struct ProductStub {
    id: ApiId,
}

/// One catalog page: the ids it carried and whether another page follows.
#[derive(Debug)]
pub struct CatalogPage {
    pub ids: Vec<String>,
    pub has_next: bool,
    pub total_pages: Option<u64>,
}

/// Fetch a single page of a city's catalog.
pub async fn fetch_catalog_page(
    client: &DealsClient,
    city_id: &str,
    page: u32,
) -> Result<CatalogPage> {
    let cfg = client.config();
    let qs = [
        ("pageSize", cfg.page_size.to_string()),
        ("hideSoldOut", cfg.hide_sold_out.to_string()),
        ("boutiqueContextId", city_id.to_string()),
        ("page", page.to_string()),
    ];
    let envelope: Envelope<Vec<ProductStub>> = client.get_json(CATALOG_PATH, &qs).await?;
    let meta = envelope.meta.unwrap_or_default();
    Ok(CatalogPage {
        ids: envelope.data.into_iter().map(|p| p.id.to_string()).collect(),
        has_next: is_truthy(&meta.next),
        total_pages: meta.total_pages,
    })
}

/// Every product id listed for `city_id`, pages concatenated in order.
///
/// Starts at page 0 and keeps going while `meta.next` is truthy, or until the
/// configured `max_pages` is reached.
pub async fn product_ids_for_city(client: &DealsClient, city_id: &str) -> Result<Vec<String>> {
    let max_pages = client.config().max_pages;
    let mut ids = Vec::new();
    let mut page: u32 = 0;

    loop {
        let batch = fetch_catalog_page(client, city_id, page).await?;
        let total = batch
            .total_pages
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".into());
        info!(city_id, page = page + 1, count = batch.ids.len(), "Page {} of {}", page + 1, total);
        ids.extend(batch.ids);

        if !batch.has_next {
            break;
        }
        page += 1;
        if max_pages.is_some_and(|max| page >= max) {
            warn!(city_id, pages = page, "catalog page limit reached; stopping early");
            break;
        }
    }

    debug!(city_id, total = ids.len(), "catalog walk finished");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DealsConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, max_pages: Option<u32>) -> DealsClient {
        let mut cfg = DealsConfig::for_base_url(server.url("/api/"));
        cfg.max_pages = max_pages;
        DealsClient::new(cfg).unwrap()
    }

    #[tokio::test]
    async fn concatenates_pages_until_next_clears() {
        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v3.4/catalog/products")
                    .query_param("pageSize", "200")
                    .query_param("hideSoldOut", "false")
                    .query_param("boutiqueContextId", "42")
                    .query_param("page", "0");
                then.status(200).json_body(json!({
                    "data": [{"id": 1}, {"id": 2}],
                    "meta": {"next": "/v3.4/catalog/products?page=1", "totalPages": 2}
                }));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v3.4/catalog/products")
                    .query_param("boutiqueContextId", "42")
                    .query_param("page", "1");
                then.status(200).json_body(json!({
                    "data": [{"id": 3}, {"id": "4b"}],
                    "meta": {"next": null, "totalPages": 2}
                }));
            })
            .await;

        let ids = product_ids_for_city(&client_for(&server, None), "42")
            .await
            .unwrap();

        assert_eq!(ids, vec!["1", "2", "3", "4b"]);
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn single_page_without_next_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3.4/catalog/products");
                then.status(200).json_body(json!({
                    "data": [{"id": 9}],
                    "meta": {"totalPages": 1}
                }));
            })
            .await;

        let ids = product_ids_for_city(&client_for(&server, None), "7")
            .await
            .unwrap();
        assert_eq!(ids, vec!["9"]);
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn max_pages_bounds_the_walk() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3.4/catalog/products");
                then.status(200).json_body(json!({
                    "data": [{"id": 5}],
                    "meta": {"next": true, "totalPages": 99}
                }));
            })
            .await;

        let ids = product_ids_for_city(&client_for(&server, Some(3)), "1")
            .await
            .unwrap();
        assert_eq!(ids.len(), 3);
        mock.assert_hits_async(3).await;
    }

    #[tokio::test]
    async fn page_failure_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3.4/catalog/products");
                then.status(500).body("boom");
            })
            .await;

        let err = product_ids_for_city(&client_for(&server, None), "1")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::DealsError::Http { status: 500, .. }));
    }
}

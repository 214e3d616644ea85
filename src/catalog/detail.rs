use serde_json::Value;
use tracing::debug;
use url::Url;

use super::Envelope;
use crate::client::DealsClient;
use crate::error::Result;
use crate::normalization::deal::{normalize_product, DealRecord, ProductDetail};

fn detail_url(client: &DealsClient, product_id: &str) -> Result<Url> {
    client.endpoint(&["v3", "products", product_id.trim()])
}

/// Raw `data` document for one product, untouched.
pub async fn fetch_product_document(client: &DealsClient, product_id: &str) -> Result<Value> {
    let envelope: Envelope<Value> =
        client.get_json_url(detail_url(client, product_id)?, &[]).await?;
    Ok(envelope.data)
}

/// Fetch one product and flatten it into a [`DealRecord`].
pub async fn product_info(client: &DealsClient, product_id: &str) -> Result<DealRecord> {
    let envelope: Envelope<ProductDetail> =
        client.get_json_url(detail_url(client, product_id)?, &[]).await?;
    let record = normalize_product(&envelope.data, &client.config().site_url)?;
    debug!(product_id, price = ?record.price, "product normalized");
    Ok(record)
}

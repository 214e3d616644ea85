//! Reshape a nested product detail document into a flat [`DealRecord`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::expiration::extract_expiration_date;
use super::price::{cents_to_major, parse_cents};
use crate::catalog::ApiId;
use crate::error::Result;

/// Flat output row. Field order is the output column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    pub id: Option<String>,
    pub url: Option<String>,
    pub store_name: Option<String>,
    pub deal_saving: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<f64>,
    pub expiration_date: Option<String>,
    pub terms: Option<String>,
    pub price: Option<f64>,
    pub image: String,
    pub city: Option<String>,
    pub address2: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub zip: Option<String>,
}

/// The parts of the product detail payload we read. Everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(default)]
    pub id: Option<ApiId>,
    #[serde(default)]
    pub boutique_id: Option<ApiId>,
    #[serde(default, deserialize_with = "opt_text")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub short_description: Option<String>,
    #[serde(default)]
    pub locations: Option<Vec<Location>>,
    /// Image lookup tolerates any shape here, so it stays untyped.
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub skus: Option<Vec<Sku>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, deserialize_with = "present_text")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_text")]
    pub address2: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_text")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_text")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_text")]
    pub postal_code: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sku {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub msrp: Option<Value>,
    #[serde(default, deserialize_with = "present_text")]
    pub terms: Option<Option<String>>,
    #[serde(default, deserialize_with = "opt_text")]
    pub features: Option<String>,
}

/// Accept strings as-is and render other scalars; objects and arrays are dropped.
fn opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Outer `None` means the key was absent; `Some(None)` means it was present but null.
fn present_text<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_text(deserializer).map(Some)
}

/// Absent keys default to `""`; explicit nulls stay unset.
fn text_or_empty(field: &Option<Option<String>>) -> Option<String> {
    match field {
        None => Some(String::new()),
        Some(value) => value.clone(),
    }
}

const IMAGE_KEYS: [&str; 3] = ["images_detail", "images_alt", "images_tablet"];

/// First image of the first color, preferring detail, then alt, then tablet shots.
///
/// Each key is consulted only when the previous list is empty. A key that is
/// missing or not a list ends the lookup with `""`.
pub fn first_image(attributes: &Value) -> String {
    let Some(color) = attributes
        .get("colors")
        .and_then(Value::as_array)
        .and_then(|colors| colors.first())
    else {
        return String::new();
    };

    for key in IMAGE_KEYS {
        let Some(images) = color.get(key).and_then(Value::as_array) else {
            return String::new();
        };
        if let Some(image) = images.first() {
            return image_url(image).unwrap_or_default();
        }
    }
    String::new()
}

fn image_url(image: &Value) -> Option<String> {
    match image {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Link to the product page on the storefront.
pub fn product_url(site_url: &str, boutique_id: &ApiId, product_id: &ApiId) -> String {
    format!(
        "{}/boutique/product/{}/{}",
        site_url.trim_end_matches('/'),
        boutique_id,
        product_id
    )
}

/// Flatten a product detail document.
///
/// Missing locations, colors or SKUs leave their fields unset rather than
/// failing. A non-numeric price is the only hard error.
pub fn normalize_product(detail: &ProductDetail, site_url: &str) -> Result<DealRecord> {
    let mut record = DealRecord {
        id: detail.id.as_ref().map(ToString::to_string),
        url: match (&detail.boutique_id, &detail.id) {
            (Some(boutique), Some(id)) => Some(product_url(site_url, boutique, id)),
            _ => None,
        },
        store_name: detail.brand.clone(),
        deal_saving: detail.name.clone(),
        description: detail.short_description.clone(),
        image: first_image(&detail.attributes),
        ..DealRecord::default()
    };

    apply_address(detail, &mut record);
    apply_sku(detail, &mut record)?;
    Ok(record)
}

fn apply_address(detail: &ProductDetail, record: &mut DealRecord) {
    let Some(address) = detail
        .locations
        .as_deref()
        .and_then(|locs| locs.first())
        .and_then(|loc| loc.addresses.first())
    else {
        return;
    };

    record.city = text_or_empty(&address.city);
    record.address2 = text_or_empty(&address.address2);
    record.state = text_or_empty(&address.state);
    record.address = text_or_empty(&address.address);
    record.zip = text_or_empty(&address.postal_code);
}

fn apply_sku(detail: &ProductDetail, record: &mut DealRecord) -> Result<()> {
    let Some(sku) = detail.skus.as_deref().and_then(|skus| skus.first()) else {
        return Ok(());
    };

    record.terms = text_or_empty(&sku.terms);
    record.price = Some(cents_to_major(parse_cents(sku.price.as_ref())?));
    record.original_price = Some(cents_to_major(parse_cents(sku.msrp.as_ref())?));

    let expiration = sku
        .features
        .as_deref()
        .and_then(extract_expiration_date)
        .unwrap_or_default();
    if expiration.is_empty() {
        debug!(product_id = ?record.id, "no expiration date in sku features");
    }
    record.expiration_date = Some(expiration);
    Ok(())
}

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiId, Envelope};
use crate::client::DealsClient;
use crate::error::Result;

pub const CITIES_PATH: &str = "v3/city";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// Boutique context scoping the city's catalog.
    #[serde(rename = "contextId")]
    pub context_id: ApiId,
}

/// Fetch every city the storefront serves, in API order.
pub async fn list_cities(client: &DealsClient) -> Result<Vec<City>> {
    let envelope: Envelope<Vec<City>> = client.get_json(CITIES_PATH, &[]).await?;
    info!(count = envelope.data.len(), "{} cities found", envelope.data.len());
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DealsConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_exactly_the_data_array() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/city");
                then.status(200).json_body(json!({
                    "data": [
                        {"name": "New York", "contextId": 101, "slug": "nyc"},
                        {"name": "Chicago", "contextId": "chi-7"}
                    ],
                    "meta": {}
                }));
            })
            .await;

        let client = DealsClient::new(DealsConfig::for_base_url(server.url("/api/"))).unwrap();
        let cities = list_cities(&client).await.unwrap();

        assert_eq!(
            cities,
            vec![
                City {
                    name: "New York".into(),
                    context_id: ApiId::Num(101),
                },
                City {
                    name: "Chicago".into(),
                    context_id: ApiId::Text("chi-7".into()),
                },
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_data_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/city");
                then.status(200).json_body(json!({"meta": {}}));
            })
            .await;

        let client = DealsClient::new(DealsConfig::for_base_url(server.url("/api/"))).unwrap();
        assert!(list_cities(&client).await.is_err());
    }
}

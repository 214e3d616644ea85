use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::DealsConfig;
use crate::error::{DealsError, Result};

/// Thin GET+JSON client for the deals API. Cheap to clone.
#[derive(Clone)]
pub struct DealsClient {
    http: Client,
    cfg: Arc<DealsConfig>,
    base: Url,
}

impl DealsClient {
    pub fn new(cfg: DealsConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&cfg.user_agent)
                .map_err(|e| DealsError::Config(format!("user agent: {e}")))?,
        );
        if let Some(host) = &cfg.host_header {
            headers.insert(
                header::HOST,
                header::HeaderValue::from_str(host)
                    .map_err(|e| DealsError::Config(format!("host header: {e}")))?,
            );
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        // Url::join drops the last segment unless the base ends in '/'.
        let raw = if cfg.base_url.ends_with('/') {
            cfg.base_url.clone()
        } else {
            format!("{}/", cfg.base_url)
        };
        let base = Url::parse(&raw)
            .map_err(|e| DealsError::Config(format!("base url {raw:?}: {e}")))?;

        Ok(Self {
            http,
            cfg: Arc::new(cfg),
            base,
        })
    }

    pub fn config(&self) -> &DealsConfig {
        &self.cfg
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| DealsError::Config(format!("endpoint {path:?}: {e}")))
    }

    /// API root extended by `segments`, each percent-encoded as one path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DealsError::Config(format!("base url {} cannot take a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `path` (relative to the API root) and decode the body as `T`.
    /// Non-2xx statuses become `DealsError::Http` carrying the body text.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        qs: &[(&str, String)],
    ) -> Result<T> {
        self.get_json_url(self.url(path)?, qs).await
    }

    pub async fn get_json_url<T: DeserializeOwned>(
        &self,
        url: Url,
        qs: &[(&str, String)],
    ) -> Result<T> {
        let mut req = self.http.get(url.clone());
        if !qs.is_empty() {
            req = req.query(qs);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        debug!(url = %url, status = status.as_u16(), bytes = bytes.len(), "deals api GET");

        if !status.is_success() {
            return Err(DealsError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(serde_json::from_slice::<T>(&bytes)?)
    }
}

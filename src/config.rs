use crate::util::env::{env_flag, env_opt, env_parse, env_parse_opt, env_raw};

pub const DEFAULT_BASE_URL: &str = "https://www.gilt.com/api/";
pub const DEFAULT_SITE_URL: &str = "https://www.gilt.com";
pub const DEFAULT_HOST_HEADER: &str = "www.gilt.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/78.0.3904.108 Safari/537.36";
pub const DEFAULT_PAGE_SIZE: u32 = 200;

#[derive(Clone, Debug)]
pub struct DealsConfig {
    /// API root; endpoint paths are joined onto it.
    pub base_url: String,
    /// Public storefront root used to build product links.
    pub site_url: String,
    pub user_agent: String,
    /// `None` lets the HTTP client derive Host from the URL.
    pub host_header: Option<String>,
    pub page_size: u32,
    pub hide_sold_out: bool,
    /// Upper bound on catalog pages per city; `None` follows `meta.next` until it clears.
    pub max_pages: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Default for DealsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            site_url: DEFAULT_SITE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            host_header: Some(DEFAULT_HOST_HEADER.into()),
            page_size: DEFAULT_PAGE_SIZE,
            hide_sold_out: false,
            max_pages: None,
            timeout_secs: None,
        }
    }
}

impl DealsConfig {
    /// Defaults overlaid with `DEALS_*` environment variables (.env is honoured).
    pub fn from_env() -> Self {
        let d = Self::default();
        // An explicitly empty DEALS_HOST_HEADER disables the override.
        let host_header = match env_raw("DEALS_HOST_HEADER") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => d.host_header,
        };
        Self {
            base_url: env_opt("DEALS_BASE_URL").unwrap_or(d.base_url),
            site_url: env_opt("DEALS_SITE_URL").unwrap_or(d.site_url),
            user_agent: env_opt("DEALS_USER_AGENT").unwrap_or(d.user_agent),
            host_header,
            page_size: env_parse("DEALS_PAGE_SIZE", d.page_size),
            hide_sold_out: env_flag("DEALS_HIDE_SOLD_OUT", d.hide_sold_out),
            max_pages: env_parse_opt("DEALS_MAX_PAGES"),
            timeout_secs: env_parse_opt("DEALS_HTTP_TIMEOUT_SECS"),
        }
    }

    /// Config pointed at an arbitrary API root with no Host override.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            host_header: None,
            ..Self::default()
        }
    }
}

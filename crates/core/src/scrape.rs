use crate::error::ScrapeError;
use crate::models::{FetchOptions, PageCapture};
use chrono::Utc;
use reqwest::{Client, Proxy};
use std::time::Duration;
use tracing::info;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("web-extract/", env!("CARGO_PKG_VERSION"));

/// Fetches raw page HTML over plain HTTP, with optional basic
/// (unauthenticated) proxy support.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(options: FetchOptions) -> Result<Self, ScrapeError> {
        let timeout = Duration::from_secs(options.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let user_agent = options
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let mut builder = Client::builder().timeout(timeout).user_agent(user_agent);

        if let Some(proxy) = options.proxy.as_deref().filter(|value| !value.is_empty()) {
            info!(proxy, "using basic proxy");
            let proxy = Proxy::all(proxy)
                .map_err(|error| ScrapeError::InvalidProxy(format!("{proxy}: {error}")))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<PageCapture, ScrapeError> {
        let parsed = Url::parse(url)?;

        info!(url = %parsed, "fetching page");
        let response = self.client.get(parsed.clone()).send().await?;

        if !response.status().is_success() {
            return Err(ScrapeError::BadStatus {
                url: parsed.to_string(),
                status: response.status().to_string(),
            });
        }

        let html = response.text().await?;

        Ok(PageCapture {
            url: parsed.to_string(),
            html,
            fetched_at: Utc::now(),
        })
    }
}

//! Rate-limited HTTP client for the card-search API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::config::{LimitsConfig, NetworkConfig};
use crate::error::{Error, Result};
use crate::ports::{CardSource, SearchOrder};

use super::types::{RawCard, SearchResponse};

/// Serializes outbound requests through one shared last-dispatch instant.
///
/// The lock is held across the pacing sleep, so concurrent callers queue up
/// behind it instead of bursting. The timestamp is written before the request
/// goes out; a failed request still pays for the next caller's spacing.
pub struct RateLimiter {
    spacing: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(spacing: Duration) -> Self {
        Self {
            spacing,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Wait until the minimum spacing since the previous dispatch has
    /// elapsed, then claim the dispatch slot.
    pub async fn acquire(&self) {
        let mut last = self.last_dispatch.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.spacing {
                tokio::time::sleep(self.spacing - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Instant of the most recent dispatch, if any.
    pub async fn last_dispatch(&self) -> Option<Instant> {
        *self.last_dispatch.lock().await
    }
}

/// Card API client. Every call goes through the shared [`RateLimiter`].
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl ScryfallClient {
    pub fn new(network: &NetworkConfig, limits: &LimitsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(network.user_agent.clone())
            .timeout(Duration::from_secs(network.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: network.scryfall_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(Duration::from_millis(limits.request_spacing_ms)),
        })
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// `GET /cards/search`. A 404 is how the API reports an empty match,
    /// so it maps to an empty vec rather than an error.
    pub async fn search(&self, query: &str, order: SearchOrder) -> Result<Vec<RawCard>> {
        self.limiter.acquire().await;
        let url = format!("{}/cards/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("order", order.as_str()), ("unique", "cards")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(query, "search matched nothing");
            return Ok(Vec::new());
        }
        let response = check_status(response)?;
        let body: SearchResponse = response.json().await?;
        debug!(query, results = body.data.len(), "search complete");
        Ok(body.data)
    }

    /// `GET /cards/named?fuzzy=`. Unlike search, a miss here is an error;
    /// callers decide whether that is fatal.
    pub async fn named(&self, fuzzy_name: &str) -> Result<RawCard> {
        self.limiter.acquire().await;
        let url = format!("{}/cards/named", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("fuzzy", fuzzy_name)])
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            status,
            url: response.url().to_string(),
        })
    }
}

#[async_trait]
impl CardSource for ScryfallClient {
    async fn search(&self, query: &str, order: SearchOrder) -> Result<Vec<RawCard>> {
        ScryfallClient::search(self, query, order).await
    }

    async fn named(&self, fuzzy_name: &str) -> Result<RawCard> {
        ScryfallClient::named(self, fuzzy_name).await
    }
}

use crate::config::ScraperConfig;
use crate::scraper::ScrapeError;
use rand::RngExt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

pub struct HttpClient {
    inner: reqwest::Client,
    config: ScraperConfig,
}

impl HttpClient {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            // Accept cookies so session-based pages work
            .cookie_store(true)
            .build()?;

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }

    /// Fetch a URL as text with rate-limiting and retry. Retries only
    /// transient outcomes (connection errors, 429/503); other non-success
    /// statuses fail fast.
    pub async fn get_text(&self, url: &str) -> Result<String, ScrapeError> {
        self.polite_delay().await;

        let mut last_err: Option<ScrapeError> = None;

        for attempt in 1..=(self.config.max_retries + 1) {
            debug!("GET {} (attempt {})", url, attempt);

            match self.inner.get(url).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return Ok(resp.text().await?);
                    } else if status.as_u16() == 429 || status.as_u16() == 503 {
                        let backoff = Duration::from_millis(
                            self.config.request_delay_ms * (2u64.pow(attempt)),
                        );
                        warn!(
                            "Rate limited ({}) on attempt {}, sleeping {:?}",
                            status, attempt, backoff
                        );
                        sleep(backoff).await;
                        last_err = Some(ScrapeError::Transport {
                            status: status.as_u16(),
                        });
                    } else {
                        return Err(ScrapeError::Transport {
                            status: status.as_u16(),
                        });
                    }
                }
                Err(e) => {
                    let backoff =
                        Duration::from_millis(self.config.request_delay_ms * (attempt as u64));
                    warn!("Request failed on attempt {}: {}", attempt, e);
                    last_err = Some(ScrapeError::Request(e));
                    sleep(backoff).await;
                }
            }
        }

        warn!("All retries exhausted for {}", url);
        Err(last_err.unwrap_or(ScrapeError::Transport { status: 0 }))
    }

    /// Sleep for the configured delay + random jitter.
    async fn polite_delay(&self) {
        let jitter = rand::rng().random_range(0..=self.config.jitter_ms);
        let total = Duration::from_millis(self.config.request_delay_ms + jitter);
        sleep(total).await;
    }
}

pub mod cleaner;
pub mod http_client;
pub mod parsers;

use crate::config::ScraperConfig;
use crate::models::RawRow;
use crate::pipeline::profile::SourceProfile;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use url::Url;

use self::http_client::HttpClient;

// ── Acquisition errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Source replied with a non-success HTTP status.
    #[error("source returned HTTP {status}")]
    Transport { status: u16 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("bad source url: {0}")]
    Url(#[from] url::ParseError),

    /// The page came back but the expected table is gone (layout drift).
    #[error("expected table `{selector}` not found in page")]
    TableMissing { selector: String },

    #[error("bad selector `{0}`")]
    Selector(String),
}

impl ScrapeError {
    /// Structure failures get their own user-facing message; everything else
    /// reads as a transport problem.
    pub fn is_structure(&self) -> bool {
        matches!(
            self,
            ScrapeError::TableMissing { .. } | ScrapeError::Selector(_)
        )
    }
}

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable raw-table source: anything that can produce the report's rows
/// for a given source profile.
#[async_trait]
pub trait IpoTableSource: Send + Sync {
    async fn fetch_table(&self, profile: &SourceProfile) -> Result<Vec<RawRow>, ScrapeError>;
}

// ── investorgain scraper ──────────────────────────────────────────────────────

pub struct InvestorgainScraper {
    client: HttpClient,
    base_url: Url,
}

impl InvestorgainScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: HttpClient::new(config)?,
            base_url: Url::parse(&config.base_url)?,
        })
    }

    /// URL of the report page a profile reads from.
    fn report_url(&self, profile: &SourceProfile) -> Result<Url, ScrapeError> {
        Ok(self.base_url.join(profile.path())?)
    }
}

#[async_trait]
impl IpoTableSource for InvestorgainScraper {
    async fn fetch_table(&self, profile: &SourceProfile) -> Result<Vec<RawRow>, ScrapeError> {
        let url = self.report_url(profile)?;
        debug!("Fetching report page: {}", url);

        let html = self.client.get_text(url.as_str()).await?;
        parsers::parse_table(&html, profile.table_selector())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_url_joins_profile_path() {
        let config = ScraperConfig {
            base_url: "https://www.investorgain.com/".to_string(),
            ..ScraperConfig::default()
        };
        let scraper = InvestorgainScraper::new(&config).unwrap();
        let url = scraper.report_url(&SourceProfile::MainboardLive).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.investorgain.com/report/live-ipo-gmp/331/ipo/"
        );
    }

    #[test]
    fn test_structure_error_classification() {
        let missing = ScrapeError::TableMissing {
            selector: "table#mainTable".into(),
        };
        assert!(missing.is_structure());
        assert!(!ScrapeError::Transport { status: 502 }.is_structure());
    }
}

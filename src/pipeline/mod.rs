//! Pipeline orchestrator: acquisition → classification → extraction →
//! normalization → response assembly.
//!
//! Stateless and request-scoped: every call fetches a fresh snapshot, runs
//! the pure transformation stages over it and assembles an envelope. A
//! malformed field never aborts its row, a malformed row never aborts the
//! request, and no failure escapes past the assembler.

pub mod classify;
pub mod extract;
pub mod normalize;
pub mod profile;

use crate::models::{IpoRecord, ResponseEnvelope};
use crate::scraper::{IpoTableSource, ScrapeError};
use self::profile::SourceProfile;
use tracing::{info, warn};

const TRANSPORT_FAILURE_MSG: &str = "Failed to fetch IPO data from the source page.";
const STRUCTURE_MISSING_MSG: &str = "IPO report table not found on the source page.";

/// Per-request extraction counters, returned alongside the envelope and
/// logged as structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionStats {
    pub rows_seen: usize,
    pub rows_kept: usize,
    pub field_misses: usize,
}

#[derive(Debug)]
pub struct ListingOutcome {
    pub envelope: ResponseEnvelope,
    pub stats: ExtractionStats,
    /// Present when the envelope is a fetch/structure failure rather than a
    /// result (including the empty-advisory result).
    pub failure: Option<ScrapeError>,
}

/// Run the full pipeline for one profile. Never returns an error: every
/// outcome, including acquisition failure, is an envelope.
pub async fn fetch_listings(source: &dyn IpoTableSource, profile: SourceProfile) -> ListingOutcome {
    let rows = match source.fetch_table(&profile).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(profile = %profile, error = %err, "acquisition failed");
            return ListingOutcome {
                envelope: failure_envelope(&err),
                stats: ExtractionStats::default(),
                failure: Some(err),
            };
        }
    };

    let mut stats = ExtractionStats {
        rows_seen: rows.len(),
        ..Default::default()
    };

    let mut records = Vec::new();
    for entry in classify::classify_rows(&profile, rows) {
        if entry.category != profile.wanted() {
            continue;
        }
        stats.rows_kept += 1;

        let fields =
            extract::extract_fields(&profile, &entry.row, entry.category, &mut stats.field_misses);
        let normalized = normalize::normalize(&profile, fields);
        records.push(IpoRecord::from_fields(&normalized));
    }

    info!(
        profile = %profile,
        rows_seen = stats.rows_seen,
        rows_kept = stats.rows_kept,
        field_misses = stats.field_misses,
        "extraction finished"
    );

    ListingOutcome {
        envelope: assemble(&profile, records),
        stats,
        failure: None,
    }
}

/// Success or empty-advisory envelope. An empty record set is advisory, not
/// silent: clients get the error status with a human message, distinct from
/// a transport failure.
fn assemble(profile: &SourceProfile, records: Vec<IpoRecord>) -> ResponseEnvelope {
    if records.is_empty() {
        ResponseEnvelope::error(profile.empty_message())
    } else {
        ResponseEnvelope::success(records, profile.success_message())
    }
}

fn failure_envelope(err: &ScrapeError) -> ResponseEnvelope {
    if err.is_structure() {
        ResponseEnvelope::error(STRUCTURE_MISSING_MSG)
    } else {
        ResponseEnvelope::error(TRANSPORT_FAILURE_MSG)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRow, Status};
    use async_trait::async_trait;

    struct StubSource {
        rows: Vec<RawRow>,
    }

    #[async_trait]
    impl IpoTableSource for StubSource {
        async fn fetch_table(
            &self,
            _profile: &SourceProfile,
        ) -> Result<Vec<RawRow>, ScrapeError> {
            Ok(self.rows.clone())
        }
    }

    struct FailingSource {
        structure: bool,
    }

    #[async_trait]
    impl IpoTableSource for FailingSource {
        async fn fetch_table(
            &self,
            profile: &SourceProfile,
        ) -> Result<Vec<RawRow>, ScrapeError> {
            if self.structure {
                Err(ScrapeError::TableMissing {
                    selector: profile.table_selector().to_string(),
                })
            } else {
                Err(ScrapeError::Transport { status: 502 })
            }
        }
    }

    fn live_row(name: &str) -> RawRow {
        RawRow {
            cells: vec![
                ("IPO".into(), format!("{name} (Sub:6.55x)Open")),
                ("Price".into(), "₹315".into()),
                ("GMP".into(), format!("{name}GMP:₹45 (14.3%)O")),
                ("RII".into(), "2.10x".into()),
                ("Date".into(), "21-25 Nov 2024".into()),
            ],
            row_class: Some("color-green".into()),
        }
    }

    fn closed_row() -> RawRow {
        RawRow {
            cells: vec![("IPO".into(), "Stale ListingClosed".into())],
            row_class: None,
        }
    }

    #[test]
    fn test_open_listings_end_to_end() {
        let source = StubSource {
            rows: vec![live_row("Acme Industries"), closed_row()],
        };
        let outcome = tokio_test::block_on(fetch_listings(
            &source,
            SourceProfile::MainboardLive,
        ));

        assert!(outcome.failure.is_none());
        assert_eq!(outcome.stats.rows_seen, 2);
        assert_eq!(outcome.stats.rows_kept, 1);

        let envelope = outcome.envelope;
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.ipo_data.len(), 1);

        let record = &envelope.ipo_data[0];
        assert_eq!(record.company_name.as_deref(), Some("Acme Industries"));
        assert_eq!(record.gmp, 45);
        assert_eq!(record.ipo_price, 315);
        assert_eq!(record.listing_gain, "14.3%");
        assert_eq!(record.retail_subs_ratio, "2.10x");
        assert_eq!(record.open_date, "21st Nov 2024");
        assert_eq!(record.close_date, "25th Nov 2024");
    }

    #[test]
    fn test_empty_result_is_advisory_not_silent_success() {
        let source = StubSource {
            rows: vec![closed_row()],
        };
        let outcome = tokio_test::block_on(fetch_listings(
            &source,
            SourceProfile::MainboardLive,
        ));

        assert!(outcome.failure.is_none());
        assert_eq!(outcome.envelope.status, Status::Error);
        assert!(outcome.envelope.ipo_data.is_empty());
        assert_eq!(
            outcome.envelope.message,
            SourceProfile::MainboardLive.empty_message()
        );
    }

    #[test]
    fn test_transport_failure_envelope() {
        let outcome = tokio_test::block_on(fetch_listings(
            &FailingSource { structure: false },
            SourceProfile::MainboardLive,
        ));

        assert!(outcome.failure.is_some());
        assert_eq!(outcome.envelope.status, Status::Error);
        assert!(outcome.envelope.ipo_data.is_empty());
        assert_eq!(outcome.envelope.message, TRANSPORT_FAILURE_MSG);
    }

    #[test]
    fn test_structure_failure_gets_distinct_message() {
        let outcome = tokio_test::block_on(fetch_listings(
            &FailingSource { structure: true },
            SourceProfile::MainboardLive,
        ));

        assert_eq!(outcome.envelope.message, STRUCTURE_MISSING_MSG);
        assert_eq!(outcome.envelope.status, Status::Error);
    }

    #[test]
    fn test_upcoming_listings_end_to_end() {
        let upcoming = RawRow {
            cells: vec![
                ("IPO".into(), "Nimbus EnergyUpcoming".into()),
                ("Price".into(), "-".into()),
                ("GMP".into(), "-".into()),
                ("Date".into(), "2-4 Dec".into()),
            ],
            row_class: None,
        };
        let source = StubSource {
            rows: vec![upcoming, live_row("Acme Industries")],
        };
        let outcome = tokio_test::block_on(fetch_listings(
            &source,
            SourceProfile::MainboardUpcoming,
        ));

        let envelope = outcome.envelope;
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.ipo_data.len(), 1);

        let record = &envelope.ipo_data[0];
        assert_eq!(record.company_name.as_deref(), Some("Nimbus Energy"));
        assert_eq!(record.gmp, 0);
        assert_eq!(record.ipo_price, 0);
        assert_eq!(record.listing_gain, "0%");
        assert_eq!(record.retail_subs_ratio, "N/A");
        assert_eq!(record.open_date, "2nd Dec");
        assert_eq!(record.close_date, "4th Dec");
    }

    #[test]
    fn test_malformed_row_never_aborts_the_request() {
        let mut broken = live_row("Acme Industries");
        broken.cells = vec![("IPO".into(), "????Open".into())];
        let source = StubSource {
            rows: vec![broken, live_row("Beta Corp")],
        };
        let outcome = tokio_test::block_on(fetch_listings(
            &source,
            SourceProfile::MainboardLive,
        ));

        // Both rows survive; the broken one is all placeholders
        assert_eq!(outcome.envelope.ipo_data.len(), 2);
        let broken_record = &outcome.envelope.ipo_data[0];
        assert_eq!(broken_record.company_name.as_deref(), Some("????"));
        assert_eq!(broken_record.gmp, 0);
        assert_eq!(broken_record.open_date, "-");
    }
}

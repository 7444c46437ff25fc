use super::profile::SourceProfile;
use crate::models::{ClassifiedRow, RawRow, RowCategory};

/// Tag every raw row with exactly one category. Nothing is filtered here;
/// the output length always equals the input length.
pub fn classify_rows(profile: &SourceProfile, rows: Vec<RawRow>) -> Vec<ClassifiedRow> {
    rows.into_iter()
        .map(|row| ClassifiedRow {
            category: classify_row(profile, &row),
            row,
        })
        .collect()
}

pub fn classify_row(profile: &SourceProfile, row: &RawRow) -> RowCategory {
    let label = row.cell(profile.primary_label()).unwrap_or("");

    match profile {
        SourceProfile::MainboardLive => {
            let open_state = profile.open_markers().iter().any(|m| label.ends_with(m));
            if row.has_class(profile.highlight_marker()) && open_state {
                RowCategory::Open
            } else if label.ends_with(profile.closed_marker()) {
                RowCategory::Closed
            } else {
                RowCategory::Irrelevant
            }
        }
        SourceProfile::MainboardUpcoming => {
            if label.contains(profile.upcoming_marker()) {
                RowCategory::Upcoming
            } else {
                RowCategory::Irrelevant
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

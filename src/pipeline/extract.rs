use super::profile::{FieldKind, SourceProfile};
use crate::models::{ExtractedFields, FieldValue, RawRow, RowCategory};
use crate::scraper::cleaner;

// Labels for the values compound cells carry alongside their main column.
const SUB_LABEL: &str = "Sub";
const EST_LISTING_LABEL: &str = "Est Listing";
const OPEN_DATE_LABEL: &str = "Open Date";
const CLOSE_DATE_LABEL: &str = "Close Date";

/// Convert one classified row's cells into labelled field values. Best-effort
/// throughout: a cell that does not match its pattern becomes `Null` (and is
/// counted in `misses`), never an error. Every recognized column produces an
/// entry, parsed or not.
pub fn extract_fields(
    profile: &SourceProfile,
    row: &RawRow,
    category: RowCategory,
    misses: &mut usize,
) -> ExtractedFields {
    let mut fields = ExtractedFields::new();

    for (label, kind) in profile.columns() {
        let text = row.cell(label);
        match kind {
            FieldKind::Primary => {
                extract_primary(profile, category, text, &mut fields, misses)
            }
            FieldKind::Money => {
                let value = text.and_then(cleaner::parse_money);
                if value.is_none() && is_substantive(text) {
                    *misses += 1;
                }
                fields.set(*label, value.map(FieldValue::Int).unwrap_or(FieldValue::Null));
            }
            FieldKind::GmpComposite => {
                match text.and_then(cleaner::split_gmp_cell) {
                    Some(quote) => {
                        fields.set(*label, FieldValue::Int(quote.premium));
                        fields.set(EST_LISTING_LABEL, FieldValue::text(quote.gain));
                    }
                    None => {
                        if is_substantive(text) {
                            *misses += 1;
                        }
                        fields.set(*label, FieldValue::Null);
                        fields.set(EST_LISTING_LABEL, FieldValue::Null);
                    }
                }
            }
            FieldKind::DateRange => {
                let (open, close) = text
                    .map(cleaner::expand_range_cell)
                    .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
                if open == "-" && is_substantive(text) {
                    *misses += 1;
                }
                fields.set(OPEN_DATE_LABEL, FieldValue::text(open));
                fields.set(CLOSE_DATE_LABEL, FieldValue::text(close));
            }
            FieldKind::Ratio => {
                let value = text
                    .map(str::trim)
                    .filter(|t| !t.is_empty() && *t != "-")
                    .map(FieldValue::text)
                    .unwrap_or(FieldValue::Null);
                fields.set(*label, value);
            }
        }
    }

    fields
}

/// Company name plus the subscription ratio the primary cell may embed.
/// Marker stripping failing on an open or closed row leaves the name `Null`;
/// on an upcoming row the full raw text stands in.
fn extract_primary(
    profile: &SourceProfile,
    category: RowCategory,
    text: Option<&str>,
    fields: &mut ExtractedFields,
    misses: &mut usize,
) {
    let label = profile.primary_label();

    let Some(text) = text else {
        fields.set(label, FieldValue::Null);
        fields.set(SUB_LABEL, FieldValue::Null);
        *misses += 1;
        return;
    };

    let stripped = cleaner::strip_trailing_marker(text, profile.status_markers())
        .map(|name| cleaner::strip_subscription_block(&name));

    let company = match (stripped, category) {
        (Some(name), _) => FieldValue::text(name),
        (None, RowCategory::Upcoming) => FieldValue::text(text),
        (None, _) => {
            *misses += 1;
            FieldValue::Null
        }
    };
    fields.set(label, company);

    let ratio = cleaner::subscription_ratio(text)
        .map(FieldValue::text)
        .unwrap_or(FieldValue::Null);
    fields.set(SUB_LABEL, ratio);
}

/// Cell text that carries an actual value, as opposed to an absent column or
/// the report's own placeholder glyphs.
fn is_substantive(text: Option<&str>) -> bool {
    matches!(text.map(str::trim), Some(t) if !t.is_empty() && t != "-" && t != "–" && t != "—")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn live_row() -> RawRow {
        RawRow {
            cells: vec![
                ("IPO".into(), "Acme Industries (Sub:6.55x)Open".into()),
                ("Price".into(), "₹315".into()),
                ("GMP".into(), "Acme IndustriesGMP:₹45 (14.3%)O".into()),
                ("RII".into(), "2.10x".into()),
                ("Date".into(), "21-25 Nov 2024".into()),
            ],
            row_class: Some("color-green".into()),
        }
    }

    #[test]
    fn test_live_row_extraction() {
        let mut misses = 0;
        let fields = extract_fields(
            &SourceProfile::MainboardLive,
            &live_row(),
            RowCategory::Open,
            &mut misses,
        );

        assert_eq!(fields.get_text("IPO"), Some("Acme Industries"));
        assert_eq!(fields.get_int("Price"), Some(315));
        assert_eq!(fields.get_int("GMP"), Some(45));
        assert_eq!(fields.get_text("Est Listing"), Some("14.3%"));
        assert_eq!(fields.get_text("Sub"), Some("6.55x"));
        assert_eq!(fields.get_text("RII"), Some("2.10x"));
        assert_eq!(fields.get_text("Open Date"), Some("21st Nov 2024"));
        assert_eq!(fields.get_text("Close Date"), Some("25th Nov 2024"));
        assert_eq!(misses, 0);
    }

    #[test]
    fn test_malformed_cells_become_nulls_not_errors() {
        let row = RawRow {
            cells: vec![
                ("IPO".into(), "No Marker Here".into()),
                ("Price".into(), "call broker".into()),
                ("GMP".into(), "watch this space".into()),
                ("Date".into(), "TBD".into()),
            ],
            row_class: Some("color-green".into()),
        };

        let mut misses = 0;
        let fields = extract_fields(
            &SourceProfile::MainboardLive,
            &row,
            RowCategory::Open,
            &mut misses,
        );

        assert_eq!(fields.get("IPO"), Some(&FieldValue::Null));
        assert_eq!(fields.get("Price"), Some(&FieldValue::Null));
        assert_eq!(fields.get("GMP"), Some(&FieldValue::Null));
        assert_eq!(fields.get_text("Open Date"), Some("-"));
        assert_eq!(fields.get_text("Close Date"), Some("-"));
        assert_eq!(misses, 4);

        // Dash placeholders are expected source output, not parse misses
        let mut dash_misses = 0;
        let dashed = RawRow {
            cells: vec![
                ("IPO".into(), "Acme IndustriesOpen".into()),
                ("Price".into(), "–".into()),
                ("GMP".into(), "-".into()),
                ("Date".into(), "-".into()),
            ],
            row_class: Some("color-green".into()),
        };
        let fields = extract_fields(
            &SourceProfile::MainboardLive,
            &dashed,
            RowCategory::Open,
            &mut dash_misses,
        );
        assert_eq!(fields.get_int("Price"), Some(0));
        assert_eq!(dash_misses, 0);
    }

    #[test]
    fn test_upcoming_name_falls_back_to_raw_text() {
        let profile = SourceProfile::MainboardUpcoming;

        let tagged = RawRow {
            cells: vec![("IPO".into(), "Acme IndustriesUpcoming".into())],
            row_class: None,
        };
        let mut misses = 0;
        let fields = extract_fields(&profile, &tagged, RowCategory::Upcoming, &mut misses);
        assert_eq!(fields.get_text("IPO"), Some("Acme Industries"));

        let untagged = RawRow {
            cells: vec![("IPO".into(), "Acme Industries".into())],
            row_class: None,
        };
        let fields = extract_fields(&profile, &untagged, RowCategory::Upcoming, &mut misses);
        assert_eq!(fields.get_text("IPO"), Some("Acme Industries"));
    }
}

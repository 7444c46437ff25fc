use super::profile::SourceProfile;
use crate::models::{self, ExtractedFields, FieldValue};

/// Rename source labels to their canonical names, keep only the canonical
/// subset and fill the gaps with placeholders. Canonical labels map to
/// themselves, so normalizing an already-normalized set changes nothing.
pub fn normalize(profile: &SourceProfile, fields: ExtractedFields) -> ExtractedFields {
    let mut out = ExtractedFields::new();

    for (label, value) in fields.iter() {
        let Some(canonical) = canonical_label(profile, label) else {
            continue;
        };
        // Two source columns may feed one canonical field (RII vs Sub);
        // the first non-null value in label order wins.
        out.set_if_null(canonical, value.clone());
    }

    for canonical in models::CANONICAL_FIELDS {
        out.set_if_null(canonical, placeholder(canonical));
    }

    out
}

fn canonical_label(profile: &SourceProfile, label: &str) -> Option<&'static str> {
    if let Some((_, canonical)) = profile.renames().iter().find(|(source, _)| *source == label) {
        return Some(canonical);
    }
    models::CANONICAL_FIELDS.iter().copied().find(|c| *c == label)
}

fn placeholder(canonical: &str) -> FieldValue {
    match canonical {
        models::GMP | models::IPO_PRICE => FieldValue::Int(0),
        models::LISTING_GAIN => FieldValue::text("0%"),
        models::RETAIL_SUBS_RATIO => FieldValue::text("N/A"),
        models::OPEN_DATE | models::CLOSE_DATE => FieldValue::text("-"),
        // companyName stays null when nothing was extracted
        _ => FieldValue::Null,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

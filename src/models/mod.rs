use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Canonical field names ─────────────────────────────────────────────────────

pub const COMPANY_NAME: &str = "companyName";
pub const GMP: &str = "gmp";
pub const IPO_PRICE: &str = "ipoPrice";
pub const LISTING_GAIN: &str = "listingGain";
pub const RETAIL_SUBS_RATIO: &str = "retailSubsRatio";
pub const OPEN_DATE: &str = "openDate";
pub const CLOSE_DATE: &str = "closeDate";

pub const CANONICAL_FIELDS: [&str; 7] = [
    COMPANY_NAME,
    GMP,
    IPO_PRICE,
    LISTING_GAIN,
    RETAIL_SUBS_RATIO,
    OPEN_DATE,
    CLOSE_DATE,
];

// ── Raw table rows ────────────────────────────────────────────────────────────

/// One table row as acquired from the source page: labelled cells plus the
/// row's class attribute. Lives for a single request only.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    /// `(data-label, cell text)` pairs in document order.
    pub cells: Vec<(String, String)>,
    pub row_class: Option<String>,
}

impl RawRow {
    /// Cell text for a column label. Absent labels are `None`, never a panic.
    pub fn cell(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, text)| text.as_str())
    }

    pub fn has_class(&self, marker: &str) -> bool {
        self.row_class
            .as_deref()
            .map(|c| c.split_whitespace().any(|t| t == marker))
            .unwrap_or(false)
    }
}

// ── Row classification ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCategory {
    Open,
    Upcoming,
    Closed,
    Irrelevant,
}

#[derive(Debug, Clone)]
pub struct ClassifiedRow {
    pub category: RowCategory,
    pub row: RawRow,
}

// ── Extracted fields ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Null,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// Label-keyed field values for one row. Extraction is best-effort: a field
/// that cannot be parsed is stored as `Null` (or skipped), never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    fields: BTreeMap<String, FieldValue>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, label: impl Into<String>, value: FieldValue) {
        self.fields.insert(label.into(), value);
    }

    /// Insert only when the slot is vacant or still `Null`.
    pub fn set_if_null(&mut self, label: impl Into<String>, value: FieldValue) {
        let label = label.into();
        match self.fields.get(&label) {
            Some(existing) if !existing.is_null() => {}
            _ => {
                self.fields.insert(label, value);
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.fields.get(label)
    }

    pub fn get_text(&self, label: &str) -> Option<&str> {
        match self.fields.get(label) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_int(&self, label: &str) -> Option<i64> {
        match self.fields.get(label) {
            Some(FieldValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ── Canonical output record ───────────────────────────────────────────────────

/// The normalized IPO record served to clients. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpoRecord {
    pub company_name: Option<String>,
    pub gmp: i64,
    pub ipo_price: i64,
    pub listing_gain: String,
    pub retail_subs_ratio: String,
    pub open_date: String,
    pub close_date: String,
}

impl IpoRecord {
    /// Build a record from normalized fields. Missing or null slots fall back
    /// to the canonical placeholders.
    pub fn from_fields(fields: &ExtractedFields) -> Self {
        Self {
            company_name: fields.get_text(COMPANY_NAME).map(str::to_string),
            gmp: fields.get_int(GMP).unwrap_or(0),
            ipo_price: fields.get_int(IPO_PRICE).unwrap_or(0),
            listing_gain: fields.get_text(LISTING_GAIN).unwrap_or("0%").to_string(),
            retail_subs_ratio: fields
                .get_text(RETAIL_SUBS_RATIO)
                .unwrap_or("N/A")
                .to_string(),
            open_date: fields.get_text(OPEN_DATE).unwrap_or("-").to_string(),
            close_date: fields.get_text(CLOSE_DATE).unwrap_or("-").to_string(),
        }
    }
}

// ── Response envelope ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub ipo_data: Vec<IpoRecord>,
    pub message: String,
    pub status: Status,
}

impl ResponseEnvelope {
    pub fn success(records: Vec<IpoRecord>, message: impl Into<String>) -> Self {
        Self {
            ipo_data: records,
            message: message.into(),
            status: Status::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ipo_data: Vec::new(),
            message: message.into(),
            status: Status::Error,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

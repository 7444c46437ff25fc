use crate::models::{
    CLOSE_DATE, COMPANY_NAME, GMP, IPO_PRICE, LISTING_GAIN, OPEN_DATE, RETAIL_SUBS_RATIO,
    RowCategory,
};
use std::fmt;

// ── Field kinds ───────────────────────────────────────────────────────────────

/// How a source column's text is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Primary label cell: company name with a status marker and, on some
    /// layouts, an embedded "(Sub:…)" subscription block.
    Primary,
    /// Currency amount parsed to an integer.
    Money,
    /// Composite `<name>GMP:₹<amount> (<pct>)<state>` cell.
    GmpComposite,
    /// "DD-DD Month Year" or "DD-DD Month" range expanded to two dates.
    DateRange,
    /// Subscription-ratio column carried verbatim.
    Ratio,
}

// ── Source profiles ───────────────────────────────────────────────────────────

/// One report layout the pipeline knows how to read. Each variant supplies
/// its page path, table selector, classification markers and column tables;
/// the pipeline skeleton itself is shared. Adding a board means adding an
/// arm here, not another pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceProfile {
    /// Live GMP report; keeps rows whose subscription window is open.
    MainboardLive,
    /// Same report; keeps rows announced but not yet open.
    MainboardUpcoming,
}

impl SourceProfile {
    pub fn name(&self) -> &'static str {
        match self {
            SourceProfile::MainboardLive => "mainboard-live",
            SourceProfile::MainboardUpcoming => "mainboard-upcoming",
        }
    }

    /// Path of the report page, relative to the configured base URL.
    pub fn path(&self) -> &'static str {
        "report/live-ipo-gmp/331/ipo/"
    }

    pub fn table_selector(&self) -> &'static str {
        "table#mainTable"
    }

    /// Row class token marking currently-trading rows.
    pub fn highlight_marker(&self) -> &'static str {
        "color-green"
    }

    /// Trailing label tokens of an open subscription window: currently
    /// trading vs last day.
    pub fn open_markers(&self) -> &'static [&'static str] {
        &["Open", "Closes Today"]
    }

    pub fn closed_marker(&self) -> &'static str {
        "Closed"
    }

    pub fn upcoming_marker(&self) -> &'static str {
        "Upcoming"
    }

    /// All status markers this profile may find at the tail of the primary
    /// cell, for company-name stripping.
    pub fn status_markers(&self) -> &'static [&'static str] {
        match self {
            SourceProfile::MainboardLive => &["Open", "Closes Today", "Closed"],
            SourceProfile::MainboardUpcoming => &["Upcoming"],
        }
    }

    /// Column label carrying the company name.
    pub fn primary_label(&self) -> &'static str {
        "IPO"
    }

    /// Category this profile's endpoint serves.
    pub fn wanted(&self) -> RowCategory {
        match self {
            SourceProfile::MainboardLive => RowCategory::Open,
            SourceProfile::MainboardUpcoming => RowCategory::Upcoming,
        }
    }

    /// Recognized source columns and how each is parsed.
    pub fn columns(&self) -> &'static [(&'static str, FieldKind)] {
        match self {
            SourceProfile::MainboardLive => &[
                ("IPO", FieldKind::Primary),
                ("Price", FieldKind::Money),
                ("GMP", FieldKind::GmpComposite),
                ("RII", FieldKind::Ratio),
                ("Date", FieldKind::DateRange),
            ],
            SourceProfile::MainboardUpcoming => &[
                ("IPO", FieldKind::Primary),
                ("Price", FieldKind::Money),
                ("GMP", FieldKind::GmpComposite),
                ("Date", FieldKind::DateRange),
            ],
        }
    }

    /// Source label → canonical field name. Labels already canonical pass
    /// through unchanged, which keeps normalization idempotent.
    pub fn renames(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("IPO", COMPANY_NAME),
            ("Price", IPO_PRICE),
            ("GMP", GMP),
            ("Est Listing", LISTING_GAIN),
            ("RII", RETAIL_SUBS_RATIO),
            ("Sub", RETAIL_SUBS_RATIO),
            ("Open Date", OPEN_DATE),
            ("Close Date", CLOSE_DATE),
        ]
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            SourceProfile::MainboardLive => "Live IPO GMP data fetched successfully.",
            SourceProfile::MainboardUpcoming => "Upcoming IPO data fetched successfully.",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            SourceProfile::MainboardLive => "No open IPOs at the moment. Check back later.",
            SourceProfile::MainboardUpcoming => {
                "No upcoming IPOs announced yet. Check back later."
            }
        }
    }
}

impl fmt::Display for SourceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

// ── Parsers ───────────────────────────────────────────────────────────────────

/// Parse a monetary cell: strip the currency glyph and thousands separators,
/// keep digits, dot, minus.
/// "₹1,234" → 1234 | "315" → 315 | "-" / "–" / "—" → 0 (listed, no quote yet)
pub fn parse_money(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || s == "N/A" {
        return None;
    }
    if s == "-" || s == "–" || s == "—" {
        return Some(0);
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok().map(|v| v as i64)
}

/// Day-of-month with English ordinal suffix.
/// 1 → "1st" | 2 → "2nd" | 11–13 → "11th".."13th" | 21 → "21st"
pub fn ordinal_day(day: u32) -> String {
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{day}{suffix}")
}

const NO_DATE: &str = "-";

fn no_dates() -> (String, String) {
    (NO_DATE.to_string(), NO_DATE.to_string())
}

/// Expand a full "DD-DD Month Year" range into two ordinal-suffixed dates.
/// "21-25 Nov 2024" → ("21st Nov 2024", "25th Nov 2024")
/// Anything else ("TBD", "") → ("-", "-")
pub fn expand_date_range(s: &str) -> (String, String) {
    try_full_range(s.trim()).unwrap_or_else(no_dates)
}

/// Expand a bare "DD-DD" day span against a separately supplied month token.
/// ("21-25", "Nov") → ("21st Nov", "25th Nov")
pub fn expand_day_span(days: &str, month: &str) -> (String, String) {
    try_day_span(days.trim(), month.trim()).unwrap_or_else(no_dates)
}

/// Expand whatever range form a date cell carries: the four-part
/// "DD-DD Month Year" form first, then "DD-DD Month" with the month token
/// split off the span.
pub fn expand_range_cell(s: &str) -> (String, String) {
    let s = s.trim();
    try_full_range(s)
        .or_else(|| {
            let (span, month) = s.rsplit_once(' ')?;
            try_day_span(span.trim(), month.trim())
        })
        .unwrap_or_else(no_dates)
}

fn try_full_range(s: &str) -> Option<(String, String)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})\s*-\s*(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})$").unwrap()
    });

    let caps = re.captures(s)?;
    let from: u32 = caps[1].parse().ok()?;
    let to: u32 = caps[2].parse().ok()?;
    let month = &caps[3];
    let year = &caps[4];
    if !valid_month(month) {
        return None;
    }
    Some((
        format!("{} {} {}", ordinal_day(from), month, year),
        format!("{} {} {}", ordinal_day(to), month, year),
    ))
}

fn try_day_span(days: &str, month: &str) -> Option<(String, String)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^(\d{1,2})\s*-\s*(\d{1,2})$").unwrap());

    let caps = re.captures(days)?;
    let from: u32 = caps[1].parse().ok()?;
    let to: u32 = caps[2].parse().ok()?;
    if !valid_month(month) {
        return None;
    }
    Some((
        format!("{} {}", ordinal_day(from), month),
        format!("{} {}", ordinal_day(to), month),
    ))
}

fn valid_month(token: &str) -> bool {
    NaiveDate::parse_from_str(&format!("1 {token} 2000"), "%d %b %Y").is_ok()
}

// ── Composite GMP cell ────────────────────────────────────────────────────────

/// Pieces of the composite GMP cell once split.
#[derive(Debug, Clone, PartialEq)]
pub struct GmpQuote {
    pub company: String,
    pub premium: i64,
    pub gain: String,
}

/// Split the composite GMP cell the report renders as one text run:
/// `<name>GMP:₹<amount> (<percentage>)<state>` where state is O (open) or
/// C (closing). "XYZ LtdGMP:₹45 (12.5%)O" → ("XYZ Ltd", 45, "12.5%")
pub fn split_gmp_cell(s: &str) -> Option<GmpQuote> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(
            r"^(?P<name>.+?)GMP:₹(?P<amount>[-–—]|-?[\d,]+(?:\.\d+)?) \((?P<pct>\d+(?:\.\d+)?%)\)(?P<state>[OC])$",
        )
        .unwrap()
    });

    let caps = re.captures(s.trim())?;
    Some(GmpQuote {
        company: caps["name"].trim().to_string(),
        premium: parse_money(&caps["amount"]).unwrap_or(0),
        gain: caps["pct"].to_string(),
    })
}

// ── Primary-cell helpers ──────────────────────────────────────────────────────

/// Subscription ratio embedded in the primary cell: "… (Sub:6.55x) …" → "6.55x"
pub fn subscription_ratio(s: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"Sub:([^)]+?)\)").unwrap());
    re.captures(s).map(|c| c[1].trim().to_string())
}

/// Cut the text at the earliest occurrence of any status marker.
/// ("Acme IndustriesOpen", ["Open", "Closes Today"]) → "Acme Industries"
/// Returns None when no marker is present.
pub fn strip_trailing_marker(s: &str, markers: &[&str]) -> Option<String> {
    markers
        .iter()
        .filter_map(|m| s.find(m))
        .min()
        .map(|idx| s[..idx].trim().to_string())
}

/// Drop a trailing "(Sub:…)" block left over after marker stripping.
pub fn strip_subscription_block(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s*\(Sub:[^)]*\)\s*$").unwrap());
    re.replace(s, "").trim().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

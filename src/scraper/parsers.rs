use crate::models::RawRow;
use crate::scraper::ScrapeError;
use scraper::{Html, Selector};

// ── Report table ──────────────────────────────────────────────────────────────

/// Locate the report table and flatten it into labelled rows. The table
/// element being absent means the site layout changed; that is a request-fatal
/// structure failure, not an empty result.
pub fn parse_table(html: &str, table_selector: &str) -> Result<Vec<RawRow>, ScrapeError> {
    let doc = Html::parse_document(html);

    let table_sel = parse_selector(table_selector)?;
    let tr_sel = parse_selector("tr")?;
    let td_sel = parse_selector("td")?;

    let Some(table) = doc.select(&table_sel).next() else {
        return Err(ScrapeError::TableMissing {
            selector: table_selector.to_string(),
        });
    };

    let mut rows = Vec::new();
    for tr in table.select(&tr_sel) {
        let cells: Vec<(String, String)> = tr
            .select(&td_sel)
            .map(|td| {
                let label = td
                    .value()
                    .attr("data-label")
                    .unwrap_or("")
                    .trim()
                    .to_string();
                let text = td.text().collect::<String>().trim().to_string();
                (label, text)
            })
            .collect();

        // Header rows carry th cells only
        if cells.is_empty() {
            continue;
        }

        rows.push(RawRow {
            cells,
            row_class: tr.value().attr("class").map(str::to_string),
        });
    }

    Ok(rows)
}

fn parse_selector(s: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(s).map_err(|e| ScrapeError::Selector(format!("{s}: {e:?}")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

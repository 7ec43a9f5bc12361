// src/extractors/summary.rs
use once_cell::sync::Lazy;
use regex::Regex;

// --- Row Grammar (Lazy Static) ---
// DATE  US  QTY_LONG  QTY_SHORT  SYMBOL  YEAR  MONTH  EXCHANGE  EXPIRY  GROSS_PL  USD  DESCRIPTION...
// Exchange, expiry and description must be present but are not captured.
// Digits are ASCII only so every captured number parses as an integer or decimal.
static SUMMARY_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})\s+US\s+(?P<qty_long>[0-9]+)\s+(?P<qty_short>[0-9]+)\s+(?P<ticker>[A-Z]+)\s+(?P<year>[0-9]{4})\s+(?P<month>[0-9]{1,2})\s+[A-Za-z0-9]+\s+[0-9-]+\s+(?P<gross_pl>[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))\s+USD(?:\s|$)",
    )
    .expect("Failed to compile SUMMARY_ROW_RE")
});

/// Raw captures from one "Purchase and Sale Summary" row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow<'a> {
    pub trade_date: &'a str,
    pub qty_long: &'a str,
    pub qty_short: &'a str,
    pub ticker: &'a str,
    pub year: &'a str,
    pub month: &'a str,
    pub gross_pl: &'a str,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryRowParser;

impl SummaryRowParser {
    pub fn new() -> Self {
        Self
    }

    /// Matches a single line against the row grammar.
    ///
    /// The line is trimmed first and must match from its start; anything
    /// else (titles, column headings, subtotals, blanks) is `None`.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<SummaryRow<'a>> {
        let caps = SUMMARY_ROW_RE.captures(line.trim())?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str());

        Some(SummaryRow {
            trade_date: group("date")?,
            qty_long: group("qty_long")?,
            qty_short: group("qty_short")?,
            ticker: group("ticker")?,
            year: group("year")?,
            month: group("month")?,
            gross_pl: group("gross_pl")?,
        })
    }

    /// Lazily yields a row for every matching line in `section`.
    /// Non-matching lines are skipped without error.
    pub fn parse<'a>(&self, section: &'a str) -> impl Iterator<Item = SummaryRow<'a>> + 'a {
        let parser = *self;
        section.lines().filter_map(move |line| {
            let row = parser.match_line(line);
            if row.is_none() {
                tracing::trace!("Skipping non-row line: '{}'", line.trim());
            }
            row
        })
    }
}

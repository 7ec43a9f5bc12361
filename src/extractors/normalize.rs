// src/extractors/normalize.rs
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::extractors::summary::SummaryRow;
use crate::utils::error::NormalizeError;

/// Three-letter month codes used in contract months, indexed by month - 1.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One aggregated round trip from a monthly statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub trade_date: NaiveDate,
    pub ticker: String,
    /// e.g. "May23"
    pub contract_month: String,
    pub qty: u32,
    pub gross_pl: Decimal,
}

/// Looks up the abbreviation for a 1-based month number.
pub fn month_abbreviation(month: u32) -> Result<&'static str, NormalizeError> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_ABBREVIATIONS.get(idx as usize))
        .copied()
        .ok_or(NormalizeError::MonthOutOfRange(month))
}

/// Formats a contract month code from a four-digit year and a month number.
pub fn contract_month(year: u32, month: u32) -> Result<String, NormalizeError> {
    let abbreviation = month_abbreviation(month)?;
    Ok(format!("{}{:02}", abbreviation, year % 100))
}

/// Rewrites a statement amount such as `+12.5`, `-.50` or `125.` into a form
/// `Decimal::from_str` accepts: no leading `+`, a zero before a bare fraction,
/// no trailing point.
fn decimal_literal(raw: &str) -> String {
    let unsigned = raw.strip_prefix('+').unwrap_or(raw);
    let (sign, digits) = match unsigned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", unsigned),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);

    if digits.starts_with('.') {
        format!("{}0{}", sign, digits)
    } else {
        format!("{}{}", sign, digits)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Converts raw row captures into a `TransactionRecord`.
    ///
    /// Quantity comes from the long side only; the short side is not compared.
    /// Any field that cannot be converted is an error for the whole row.
    pub fn normalize(&self, row: &SummaryRow<'_>) -> Result<TransactionRecord, NormalizeError> {
        let trade_date = NaiveDate::parse_from_str(row.trade_date, "%Y-%m-%d")
            .map_err(|_| NormalizeError::InvalidTradeDate(row.trade_date.to_string()))?;

        let year: u32 = row
            .year
            .parse()
            .map_err(|_| NormalizeError::InvalidYear(row.year.to_string()))?;
        let month: u32 = row
            .month
            .parse()
            .map_err(|_| NormalizeError::InvalidMonth(row.month.to_string()))?;

        if row.qty_long != row.qty_short {
            tracing::debug!(
                "{} {}: long qty {} differs from short qty {}",
                row.trade_date,
                row.ticker,
                row.qty_long,
                row.qty_short
            );
        }
        let qty: u32 = row
            .qty_long
            .parse()
            .map_err(|_| NormalizeError::InvalidQuantity(row.qty_long.to_string()))?;

        let gross_pl = Decimal::from_str(&decimal_literal(row.gross_pl))
            .map_err(|_| NormalizeError::InvalidGrossPl(row.gross_pl.to_string()))?;

        Ok(TransactionRecord {
            trade_date,
            ticker: row.ticker.to_string(),
            contract_month: contract_month(year, month)?,
            qty,
            gross_pl,
        })
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row<'a>(month: &'a str, gross_pl: &'a str) -> SummaryRow<'a> {
        SummaryRow {
            trade_date: "2023-05-10",
            qty_long: "2",
            qty_short: "2",
            ticker: "ZB",
            year: "2023",
            month,
            gross_pl,
        }
    }

    #[test]
    fn test_normalizes_row() {
        let record = RecordNormalizer::new().normalize(&row("5", "125.50")).unwrap();

        assert_eq!(record.trade_date, NaiveDate::from_ymd_opt(2023, 5, 10).unwrap());
        assert_eq!(record.ticker, "ZB");
        assert_eq!(record.contract_month, "May23");
        assert_eq!(record.qty, 2);
        assert_eq!(record.gross_pl, Decimal::new(12550, 2));
        assert_eq!(record.gross_pl.to_string(), "125.50");
    }

    #[test]
    fn test_preserves_negative_and_explicit_positive_sign() {
        let normalizer = RecordNormalizer::new();
        let loss = normalizer.normalize(&row("5", "-80.25")).unwrap();
        let gain = normalizer.normalize(&row("5", "+80.25")).unwrap();

        assert_eq!(loss.gross_pl, Decimal::new(-8025, 2));
        assert_eq!(gain.gross_pl, Decimal::new(8025, 2));
    }

    #[test]
    fn test_bare_fraction_and_trailing_point_amounts() {
        let normalizer = RecordNormalizer::new();

        assert_eq!(normalizer.normalize(&row("5", "-.50")).unwrap().gross_pl, Decimal::new(-50, 2));
        assert_eq!(normalizer.normalize(&row("5", ".75")).unwrap().gross_pl, Decimal::new(75, 2));
        assert_eq!(normalizer.normalize(&row("5", "125.")).unwrap().gross_pl, Decimal::new(125, 0));
        assert_eq!(normalizer.normalize(&row("5", "+.5")).unwrap().gross_pl, Decimal::new(5, 1));
    }

    #[test]
    fn test_decimal_literal_forms() {
        assert_eq!(decimal_literal("-.50"), "-0.50");
        assert_eq!(decimal_literal(".75"), "0.75");
        assert_eq!(decimal_literal("125."), "125");
        assert_eq!(decimal_literal("+80.25"), "80.25");
        assert_eq!(decimal_literal("-1437.5"), "-1437.5");
    }

    #[test]
    fn test_quantity_taken_from_long_side() {
        let mut mismatched = row("5", "1.00");
        mismatched.qty_long = "3";
        mismatched.qty_short = "4";

        let record = RecordNormalizer::new().normalize(&mismatched).unwrap();
        assert_eq!(record.qty, 3);
    }

    #[test]
    fn test_zero_padded_month_and_year_suffix() {
        let mut early = row("03", "0");
        early.year = "2005";

        let record = RecordNormalizer::new().normalize(&early).unwrap();
        assert_eq!(record.contract_month, "Mar05");
    }

    #[test]
    fn test_month_out_of_range_is_an_error() {
        let normalizer = RecordNormalizer::new();
        assert_eq!(
            normalizer.normalize(&row("13", "1.00")),
            Err(NormalizeError::MonthOutOfRange(13))
        );
        assert_eq!(
            normalizer.normalize(&row("0", "1.00")),
            Err(NormalizeError::MonthOutOfRange(0))
        );
    }

    #[test]
    fn test_impossible_calendar_date_is_an_error() {
        let mut bad = row("5", "1.00");
        bad.trade_date = "2023-02-30";

        assert_eq!(
            RecordNormalizer::new().normalize(&bad),
            Err(NormalizeError::InvalidTradeDate("2023-02-30".to_string()))
        );
    }

    #[test]
    fn test_quantity_overflow_is_an_error() {
        let mut huge = row("5", "1.00");
        huge.qty_long = "99999999999";

        assert_eq!(
            RecordNormalizer::new().normalize(&huge),
            Err(NormalizeError::InvalidQuantity("99999999999".to_string()))
        );
    }

    proptest! {
        #[test]
        fn prop_contract_month_for_valid_months(month in 1u32..=12, year in 1000u32..=9999) {
            let code = contract_month(year, month).unwrap();
            let expected = format!("{}{}", MONTH_ABBREVIATIONS[(month - 1) as usize], &year.to_string()[2..]);
            prop_assert_eq!(code, expected);
        }

        #[test]
        fn prop_contract_month_rejects_invalid_months(
            month in prop_oneof![Just(0u32), 13u32..100],
            year in 1000u32..=9999,
        ) {
            prop_assert_eq!(contract_month(year, month), Err(NormalizeError::MonthOutOfRange(month)));
        }
    }
}

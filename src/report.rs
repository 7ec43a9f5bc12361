// src/report.rs
//! Console output for an import run.

use std::fmt::Write;

use crate::extractors::TransactionRecord;
use crate::pipeline::ImportSummary;

/// One "Parsing ..." block per statement with its row count.
pub fn format_document_counts(summary: &ImportSummary) -> String {
    let mut out = String::new();
    for doc in &summary.documents {
        let _ = writeln!(out, "Parsing {}…", doc.file_name);
        let _ = writeln!(out, "  {} summary rows found", doc.rows);
    }
    out
}

/// Fixed-width table of records, in the order given.
pub fn format_records_table(records: &[&TransactionRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<6} {:>5} {:<10} {:>12}",
        "Date", "Ticker", "Qty", "Contract", "Gross P&L"
    );
    let _ = writeln!(out, "{}", "-".repeat(52));
    for record in records {
        let gross_pl = format!("{:.2}", record.gross_pl.round_dp(2));
        let _ = writeln!(
            out,
            "{:<12} {:<6} {:>5} {:<10} {:>12}",
            record.trade_date.format("%Y-%m-%d").to_string(),
            record.ticker,
            record.qty,
            record.contract_month,
            gross_pl
        );
    }
    out
}

pub fn print_summary(summary: &ImportSummary) {
    print!("{}", format_document_counts(summary));
    println!("\nTotal records: {}", summary.records.len());
    print!("{}", format_records_table(&summary.sorted_records()));
}

pub fn print_dry_run() {
    println!("\n[dry-run] No writes made.");
}

pub fn print_written(written: usize, table: &str) {
    println!("\nWrote {} items to '{}'.", written, table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DocumentOutcome;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn record(ticker: &str, qty: u32, gross_pl: Decimal) -> TransactionRecord {
        TransactionRecord {
            trade_date: NaiveDate::from_ymd_opt(2023, 5, 10).unwrap(),
            ticker: ticker.to_string(),
            contract_month: "May23".to_string(),
            qty,
            gross_pl,
        }
    }

    #[test]
    fn test_document_counts() {
        let summary = ImportSummary {
            documents: vec![
                DocumentOutcome { file_name: "a.pdf".to_string(), rows: 3 },
                DocumentOutcome { file_name: "b.pdf".to_string(), rows: 0 },
            ],
            records: Vec::new(),
        };

        assert_eq!(
            format_document_counts(&summary),
            "Parsing a.pdf…\n  3 summary rows found\nParsing b.pdf…\n  0 summary rows found\n"
        );
    }

    #[test]
    fn test_table_layout() {
        let zb = record("ZB", 2, Decimal::new(12550, 2));
        let cl = record("CL", 10, Decimal::new(-8, 0));
        let table = format_records_table(&[&zb, &cl]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Date         Ticker   Qty Contract      Gross P&L");
        assert_eq!(lines[1], "-".repeat(52));
        assert_eq!(lines[2], "2023-05-10   ZB         2 May23            125.50");
        assert_eq!(lines[3], "2023-05-10   CL        10 May23             -8.00");
    }

    #[test]
    fn test_pl_rounded_to_cents() {
        let es = record("ES", 1, Decimal::new(1234567, 4));
        let table = format_records_table(&[&es]);
        assert!(table.lines().nth(2).unwrap().ends_with("123.46"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        assert_eq!(format_records_table(&[]).lines().count(), 2);
    }
}

//! CSV export of parsed transactions.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use tally_core::ParsedTransaction;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    time: String,
    #[serde(rename = "type")]
    kind: &'static str,
    category: &'a str,
    amount: String,
    description: &'a str,
    time_label: &'a str,
    source: &'a str,
}

/// Write `(source line, record)` pairs as CSV with a header row.
pub fn write_csv<W: Write>(out: W, records: &[(String, ParsedTransaction)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for (source, txn) in records {
        wtr.serialize(CsvRow {
            time: txn.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            kind: txn.kind.label(),
            category: &txn.category,
            amount: txn.amount.to_string(),
            description: &txn.description,
            time_label: txn.time_label.as_deref().unwrap_or(""),
            source,
        })
        .context("write csv row")?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use rust_decimal::Decimal;
    use tally_core::TransactionType;

    #[test]
    fn test_writes_header_and_rows() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let txn = ParsedTransaction {
            amount: Decimal::new(305, 1),
            kind: TransactionType::Expense,
            category: "餐饮".to_string(),
            description: "吃饭".to_string(),
            timestamp: tz.with_ymd_and_hms(2026, 3, 13, 12, 0, 0).unwrap(),
            time_label: Some("昨天中午".to_string()),
        };

        let mut buf = Vec::new();
        write_csv(&mut buf, &[("昨天中午吃饭30.5".to_string(), txn)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("time,type,category,amount,description,time_label,source")
        );
        assert_eq!(
            lines.next(),
            Some("2026-03-13 12:00,expense,餐饮,30.5,吃饭,昨天中午,昨天中午吃饭30.5")
        );
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}

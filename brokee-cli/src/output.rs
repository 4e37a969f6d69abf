use anyhow::{Context, Result};
use brokee_ingest::TransactionRecord;
use brokee_ledger::{ImportSummary, LedgerEntry};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn write_records(out: &mut impl Write, records: &[TransactionRecord], format: Format) -> Result<()> {
    match format {
        Format::Table => {
            writeln!(out, "{:<12} {:<36} {:>14} {:>14}", "DATE", "DESCRIPTION", "SENT", "RECEIVED")?;
            for r in records {
                writeln!(
                    out,
                    "{:<12} {:<36} {:>14} {:>14}",
                    r.date.format("%Y-%m-%d").to_string(),
                    truncate(&r.description, 36),
                    r.sent_amount.to_string(),
                    r.received_amount.to_string()
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, records).context("serialize records")?;
            writeln!(out)?;
        }
        Format::Csv => write_csv(out, records)?,
    }
    Ok(())
}

/// Records from several statements. Tables get one labelled block per
/// statement; JSON and CSV get a single document with one header.
pub fn write_record_batches(
    out: &mut impl Write,
    batches: &[(&str, &[TransactionRecord])],
    format: Format,
) -> Result<()> {
    if format == Format::Table {
        for (i, (name, records)) in batches.iter().enumerate() {
            if batches.len() > 1 {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "# {}", name)?;
            }
            write_records(out, records, format)?;
        }
        return Ok(());
    }
    let all: Vec<TransactionRecord> = batches.iter().flat_map(|(_, records)| records.iter().cloned()).collect();
    write_records(out, &all, format)
}

pub fn write_entries(out: &mut impl Write, entries: &[LedgerEntry], format: Format) -> Result<()> {
    match format {
        Format::Table => {
            writeln!(out, "{:<12} {:<4} {:<36} {:>14}", "DATE", "TYPE", "DESCRIPTION", "AMOUNT")?;
            for e in entries {
                writeln!(
                    out,
                    "{:<12} {:<4} {:<36} {:>14}",
                    e.tx_time.format("%Y-%m-%d").to_string(),
                    e.tx_type.code(),
                    truncate(&e.description, 36),
                    e.amount.to_string()
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, entries).context("serialize entries")?;
            writeln!(out)?;
        }
        Format::Csv => write_csv(out, entries)?,
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, summary: &ImportSummary) -> Result<()> {
    writeln!(
        out,
        "\nExpenses: {} (total {}) | Income: {} (total {}) | Net: {}",
        summary.expense_count,
        summary.expense_total,
        summary.income_count,
        summary.income_total,
        summary.net()
    )?;
    Ok(())
}

fn write_csv<T: Serialize>(out: &mut impl Write, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row).context("write csv row")?;
    }
    wtr.flush()?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('…');
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use brokee_ingest::parse_statement;

    fn sample() -> Vec<TransactionRecord> {
        parse_statement("01.08.2025 Some Shop €-123,45 €0,00\n2. kol 2025. Salary €0,00 €3.210,99")
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let mut buf = Vec::new();
        write_records(&mut buf, &sample(), Format::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "date,description,sent_amount,received_amount");
        assert_eq!(lines[1], "2025-08-01,Some Shop,-123.45,0.00");
        assert_eq!(lines[2], "2025-08-02,Salary,0.00,3210.99");
    }

    #[test]
    fn test_json_is_array() {
        let mut buf = Vec::new();
        write_records(&mut buf, &sample(), Format::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_table_lists_every_record() {
        let mut buf = Vec::new();
        write_records(&mut buf, &sample(), Format::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("3210.99"));
    }

    #[test]
    fn test_csv_over_several_statements_has_one_header() {
        let first = sample();
        let second = parse_statement("03.08.2025 Bakery €-1,20 €0,00");
        let mut buf = Vec::new();
        write_record_batches(&mut buf, &[("aug.txt", first.as_slice()), ("sep.txt", second.as_slice())], Format::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("date,")).count(), 1);
        assert_eq!(lines[3], "2025-08-03,Bakery,-1.20,0.00");
    }

    #[test]
    fn test_json_over_several_statements_is_one_array() {
        let first = sample();
        let second = parse_statement("03.08.2025 Bakery €-1,20 €0,00");
        let mut buf = Vec::new();
        write_record_batches(&mut buf, &[("aug.txt", first.as_slice()), ("sep.txt", second.as_slice())], Format::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_table_labels_each_statement() {
        let first = sample();
        let mut buf = Vec::new();
        write_record_batches(&mut buf, &[("aug.txt", first.as_slice()), ("sep.txt", &[][..])], Format::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# aug.txt\n"));
        assert!(text.contains("\n# sep.txt\n"));
    }

    #[test]
    fn test_truncate_long_descriptions() {
        assert_eq!(truncate("short", 36), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}

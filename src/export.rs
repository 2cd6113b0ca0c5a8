// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Report rendering. Read-only over the transaction list it is given and
//! keeps the order it is given.

use crate::error::Result;
use crate::models::{Transaction, TxType};
use crate::utils::fmt_inr;
use std::fmt::Write as _;
use std::io::Write;

pub const CSV_FILENAME: &str = "cashbook-report.csv";
pub const CSV_MIME: &str = "text/csv";
pub const REPORT_TITLE: &str = "Cashbook Report";

const REPORT_STEM: &str = "cashbook-report";

/// Default output file for a report format, e.g. `cashbook-report.html`.
pub fn default_filename(format: &str) -> String {
    format!("{}.{}", REPORT_STEM, format)
}

const HEADERS: [&str; 6] = ["Date", "Type", "Mode", "Amount", "Party", "Note"];

const STYLES: &str = r#"<style>
  body { font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto; padding: 24px; }
  h1 { font-size: 20px; margin: 0 0 16px 0; }
  table { width: 100%; border-collapse: collapse; }
  th, td { border: 1px solid #e5e7eb; padding: 8px; font-size: 12px; }
  th { background: #f1f5f9; text-align: left; }
  td.income { color: #059669; }
  td.expense { color: #e11d48; }
</style>"#;

/// Writes the header plus one row per transaction, every field quoted.
pub fn write_csv<W: Write>(transactions: &[Transaction], out: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    wtr.write_record(HEADERS)?;
    for t in transactions {
        wtr.write_record([
            t.date.to_string(),
            t.tx_type.to_string(),
            t.mode.to_string(),
            t.amount.to_string(),
            t.party.clone().unwrap_or_default(),
            t.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(transactions: &[Transaction], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, transactions)?;
    out.flush()?;
    Ok(())
}

/// Standalone printable HTML document with the same six columns as the CSV.
pub fn render_html(transactions: &[Transaction], title: &str) -> String {
    let title = escape_html(title);
    let mut doc = String::new();
    let _ = write!(
        doc,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\n{STYLES}\n</head><body>\n<h1>{title}</h1>\n<table>\n<thead><tr>"
    );
    for h in HEADERS {
        let _ = write!(doc, "<th>{h}</th>");
    }
    doc.push_str("</tr></thead>\n<tbody>\n");
    for t in transactions {
        let class = match t.tx_type {
            TxType::Income => "income",
            TxType::Expense => "expense",
        };
        let _ = writeln!(
            doc,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">&#8377;{}</td><td>{}</td><td>{}</td></tr>",
            t.date,
            t.tx_type,
            t.mode,
            class,
            fmt_inr(&t.amount),
            escape_html(t.party.as_deref().unwrap_or("")),
            escape_html(t.note.as_deref().unwrap_or("")),
        );
    }
    if transactions.is_empty() {
        doc.push_str("<tr><td colspan=\"6\">No entries yet</td></tr>\n");
    }
    doc.push_str("</tbody>\n</table>\n</body></html>\n");
    doc
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

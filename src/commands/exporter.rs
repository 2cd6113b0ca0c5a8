// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::resolve_cashbook;
use crate::export::{self, REPORT_TITLE};
use crate::ledger;
use crate::models::Transaction;
use crate::store::Store;
use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub fn handle(store: &dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let cashbook = resolve_cashbook(store, sub)?;
            let txs = ledger::list_transactions(store, &cashbook.id)?;
            write_report(&txs, sub)
        }
        _ => Ok(()),
    }
}

/// Writes `txs` in `--format` to `--out`. Unknown formats are rejected before
/// the output file is created.
pub fn write_report(txs: &[Transaction], sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let title = sub
        .get_one::<String>("title")
        .map(|s| s.as_str())
        .unwrap_or(REPORT_TITLE);

    if !matches!(fmt.as_str(), "csv" | "html" | "json") {
        return Err(anyhow!("Unknown format: {} (use csv|html|json)", fmt));
    }
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| export::default_filename(&fmt));
    let file = File::create(&out).with_context(|| format!("Create {}", out))?;
    match fmt.as_str() {
        "csv" => export::write_csv(txs, BufWriter::new(file))?,
        "json" => export::write_json(txs, BufWriter::new(file))?,
        _ => {
            use std::io::Write;
            let mut w = BufWriter::new(file);
            w.write_all(export::render_html(txs, title).as_bytes())?;
            w.flush()?;
        }
    }
    info!(path = %out, format = %fmt, rows = txs.len(), "exported transactions");
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}

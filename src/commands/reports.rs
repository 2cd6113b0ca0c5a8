// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::resolve_cashbook;
use crate::aggregate::{self, CashbookSummary};
use crate::ledger;
use crate::models::{Cashbook, Transaction};
use crate::store::Store;
use crate::utils::{fmt_inr, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => {
            let cashbook = resolve_cashbook(store, sub)?;
            let txs = ledger::list_transactions(store, &cashbook.id)?;
            print_summary(&cashbook, &txs, sub)?;
        }
        Some(("modes", sub)) => {
            let cashbook = resolve_cashbook(store, sub)?;
            let txs = ledger::list_transactions(store, &cashbook.id)?;
            print_modes(&txs, sub)?;
        }
        _ => {}
    }
    Ok(())
}

/// Shared by the local and remote `summary` commands.
pub fn print_summary(
    cashbook: &Cashbook,
    txs: &[Transaction],
    sub: &clap::ArgMatches,
) -> Result<CashbookSummary> {
    let s = aggregate::summarize_cashbook(cashbook, txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let line = |label: &str, v: &rust_decimal::Decimal| vec![label.to_string(), fmt_inr(v)];
        let rows = vec![
            line("Total Income", &s.summary.income),
            line("Total Expense", &s.summary.expense),
            line("Cash Balance", &s.summary.cash_balance),
            line("Bank Balance", &s.summary.bank_balance),
            line("Net", &s.summary.net),
            line("Opening Balance", &s.opening_balance),
            line("Closing Balance", &s.closing_balance),
        ];
        println!("{}", pretty_table(&[cashbook.name.as_str(), "Amount"], rows));
    }
    Ok(s)
}

fn print_modes(txs: &[Transaction], sub: &clap::ArgMatches) -> Result<()> {
    let modes = aggregate::by_mode(txs);
    let data: Vec<Vec<String>> = modes
        .iter()
        .map(|(mode, net)| vec![mode.to_string(), fmt_inr(net)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &modes)? {
        println!("{}", pretty_table(&["Mode", "Net"], data));
    }
    Ok(())
}

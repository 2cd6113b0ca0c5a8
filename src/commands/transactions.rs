// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{resolve_cashbook, transaction_input};
use crate::ledger;
use crate::models::{Category, Transaction};
use crate::registry;
use crate::store::Store;
use crate::utils::{fmt_inr, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("passbook", sub)) => passbook(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let cashbook = resolve_cashbook(store, sub)?;
    let mut input = transaction_input(sub)?;
    if let Some(cat) = sub.get_one::<String>("category") {
        input.category_id = Some(registry::find_category(store, &cashbook.business_id, cat)?.id);
    }
    let tx = ledger::add_transaction(store, &cashbook.id, input)?;
    println!(
        "Recorded {} of {} ({}) on {} in '{}'",
        tx.tx_type,
        fmt_inr(&tx.amount),
        tx.mode,
        tx.date,
        cashbook.name
    );
    Ok(())
}

/// Newest first, optionally capped by `--limit`.
pub fn query_rows(store: &dyn Store, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let cashbook = resolve_cashbook(store, sub)?;
    let mut txs = ledger::list_transactions(store, &cashbook.id)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }
    Ok(txs)
}

fn list(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let business = super::current_business(store)?;
        let cats = registry::list_categories(store, &business.id)?;
        print_table(data.iter(), &cats);
    }
    Ok(())
}

fn passbook(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let cashbook = resolve_cashbook(store, sub)?;
    let txs = ledger::list_transactions(store, &cashbook.id)?;
    let bank = ledger::passbook(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bank)? {
        let cats = registry::list_categories(store, &cashbook.business_id)?;
        print_table(bank.into_iter(), &cats);
    }
    Ok(())
}

/// Renders transactions as a table; unknown category ids show as `-`.
pub fn print_table<'a>(txs: impl Iterator<Item = &'a Transaction>, cats: &[Category]) {
    let rows: Vec<Vec<String>> = txs
        .map(|t| {
            let category = t
                .category_id
                .as_deref()
                .and_then(|id| cats.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "-".to_string());
            vec![
                t.date.to_string(),
                t.tx_type.to_string(),
                t.mode.to_string(),
                category,
                fmt_inr(&t.amount),
                t.party.clone().unwrap_or_default(),
                t.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    if rows.is_empty() {
        println!("No entries yet");
        return;
    }
    println!(
        "{}",
        pretty_table(
            &["Date", "Type", "Mode", "Category", "Amount", "Party", "Note"],
            rows,
        )
    );
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod businesses;
pub mod cashbooks;
pub mod categories;
pub mod staff;
pub mod transactions;
pub mod reports;
pub mod exporter;
pub mod remote;

use crate::models::{Business, Cashbook, NewTransaction, PaymentMode, TxType};
use crate::registry;
use crate::store::Store;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result, anyhow};

/// The active business, or an error telling the user how to create one.
pub fn current_business(store: &dyn Store) -> Result<Business> {
    registry::active_business(store)?
        .ok_or_else(|| anyhow!("No active business; run `cashbook business add --name ...` first"))
}

/// `--cashbook NAME` within the active business, or its first cashbook.
pub fn resolve_cashbook(store: &dyn Store, sub: &clap::ArgMatches) -> Result<Cashbook> {
    let business = current_business(store)?;
    match sub.get_one::<String>("cashbook") {
        Some(name) => Ok(registry::find_cashbook(store, &business.id, name)?),
        None => registry::list_cashbooks(store, &business.id)?
            .into_iter()
            .next()
            .with_context(|| format!("Business '{}' has no cashbooks", business.name)),
    }
}

/// Reads the shared `tx add` arguments. Absent amount/type stay `None` so the
/// ledger can report which one is missing.
pub fn transaction_input(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let opt = |k: &str| sub.get_one::<String>(k).map(|s| s.to_string());
    Ok(NewTransaction {
        date: opt("date").map(|s| parse_date(&s)).transpose()?,
        tx_type: opt("type").map(|s| s.parse::<TxType>()).transpose()?,
        mode: opt("mode").map(|s| s.parse::<PaymentMode>()).transpose()?,
        amount: opt("amount").map(|s| parse_decimal(&s)).transpose()?,
        party: opt("party"),
        category_id: None,
        note: opt("note"),
    })
}

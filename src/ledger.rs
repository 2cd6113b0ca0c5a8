// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::models::{NewTransaction, PaymentMode, Transaction};
use crate::registry::new_id;
use crate::store::Store;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Validates `input` and appends it to the cashbook's ledger.
///
/// Rejected input leaves the ledger untouched.
pub fn add_transaction(
    store: &mut dyn Store,
    cashbook_id: &str,
    input: NewTransaction,
) -> Result<Transaction> {
    let amount = match input.amount {
        Some(a) if a > Decimal::ZERO => a,
        Some(a) => return Err(Error::invalid("amount", format!("{} is not positive", a))),
        None => return Err(Error::invalid("amount", "is required")),
    };
    let tx_type = input
        .tx_type
        .ok_or_else(|| Error::invalid("type", "is required"))?;

    let cashbook = store
        .cashbook(cashbook_id)?
        .ok_or_else(|| Error::not_found("cashbook", cashbook_id))?;

    let category_id = match input.category_id {
        Some(id) => {
            let belongs = store
                .category(&id)?
                .is_some_and(|c| c.business_id == cashbook.business_id);
            if !belongs {
                return Err(Error::not_found("category", id));
            }
            Some(id)
        }
        None => None,
    };

    let tx = Transaction {
        id: new_id(),
        cashbook_id: cashbook.id,
        date: input
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        tx_type,
        mode: input.mode.unwrap_or(cashbook.default_mode),
        amount,
        party: non_empty(input.party),
        category_id,
        note: non_empty(input.note),
    };
    store.insert_transaction(&tx)?;
    info!(id = %tx.id, cashbook = %tx.cashbook_id, amount = %tx.amount, "recorded transaction");
    Ok(tx)
}

/// All transactions of a cashbook, newest first.
pub fn list_transactions(store: &dyn Store, cashbook_id: &str) -> Result<Vec<Transaction>> {
    let txs = store.transactions(cashbook_id)?;
    debug!(cashbook = cashbook_id, count = txs.len(), "loaded transactions");
    Ok(txs)
}

/// Bank-mode entries only, in the order given.
pub fn passbook(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.mode == PaymentMode::Bank)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

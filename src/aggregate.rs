// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived totals. Everything here is recomputed from the full transaction
//! list on every call; no running figure is ever stored.

use crate::models::{Cashbook, PaymentMode, Transaction, TxType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Income/expense totals with every non-bank mode counted as cash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub bank_income: Decimal,
    pub bank_expense: Decimal,
    pub cash_income: Decimal,
    pub cash_expense: Decimal,
    pub cash_balance: Decimal,
    pub bank_balance: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CashbookSummary {
    #[serde(flatten)]
    pub summary: Summary,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut bank_income = Decimal::ZERO;
    let mut bank_expense = Decimal::ZERO;

    for t in transactions {
        let bank = t.mode == PaymentMode::Bank;
        match t.tx_type {
            TxType::Income => {
                income += t.amount;
                if bank {
                    bank_income += t.amount;
                }
            }
            TxType::Expense => {
                expense += t.amount;
                if bank {
                    bank_expense += t.amount;
                }
            }
        }
    }

    let cash_income = income - bank_income;
    let cash_expense = expense - bank_expense;
    Summary {
        income,
        expense,
        bank_income,
        bank_expense,
        cash_income,
        cash_expense,
        cash_balance: cash_income - cash_expense,
        bank_balance: bank_income - bank_expense,
        net: income - expense,
    }
}

/// `opening + Σ(±amount)` over every mode.
pub fn running_balance(transactions: &[Transaction], opening_balance: Decimal) -> Decimal {
    transactions
        .iter()
        .fold(opening_balance, |acc, t| acc + signed(t))
}

pub fn summarize_cashbook(cashbook: &Cashbook, transactions: &[Transaction]) -> CashbookSummary {
    CashbookSummary {
        summary: summarize(transactions),
        opening_balance: cashbook.opening_balance,
        closing_balance: running_balance(transactions, cashbook.opening_balance),
    }
}

/// Net movement per payment mode. Modes without entries are omitted.
pub fn by_mode(transactions: &[Transaction]) -> BTreeMap<PaymentMode, Decimal> {
    let mut map = BTreeMap::new();
    for t in transactions {
        *map.entry(t.mode).or_insert(Decimal::ZERO) += signed(t);
    }
    map
}

fn signed(t: &Transaction) -> Decimal {
    match t.tx_type {
        TxType::Income => t.amount,
        TxType::Expense => -t.amount,
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::aggregate::{by_mode, running_balance, summarize, summarize_cashbook};
use cashbook::models::{Cashbook, PaymentMode, Transaction, TxType};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn tx(tx_type: TxType, amount: i64, mode: PaymentMode) -> Transaction {
    Transaction {
        id: format!("t{}", amount),
        cashbook_id: "cb".into(),
        date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        tx_type,
        mode,
        amount: Decimal::from(amount),
        party: None,
        category_id: None,
        note: None,
    }
}

#[test]
fn mixed_cash_and_bank_example() {
    let txs = vec![
        tx(TxType::Income, 100, PaymentMode::Cash),
        tx(TxType::Expense, 40, PaymentMode::Bank),
        tx(TxType::Income, 20, PaymentMode::Bank),
    ];
    let s = summarize(&txs);
    assert_eq!(s.income, Decimal::from(120));
    assert_eq!(s.expense, Decimal::from(40));
    assert_eq!(s.bank_income, Decimal::from(20));
    assert_eq!(s.bank_expense, Decimal::from(40));
    assert_eq!(s.bank_balance, Decimal::from(-20));
    assert_eq!(s.cash_income, Decimal::from(100));
    assert_eq!(s.cash_expense, Decimal::ZERO);
    assert_eq!(s.cash_balance, Decimal::from(100));
    assert_eq!(s.net, Decimal::from(80));
}

#[test]
fn non_bank_modes_count_as_cash() {
    let txs = vec![
        tx(TxType::Income, 50, PaymentMode::Upi),
        tx(TxType::Expense, 30, PaymentMode::CreditCard),
        tx(TxType::Expense, 5, PaymentMode::DebitCard),
    ];
    let s = summarize(&txs);
    assert_eq!(s.cash_income, Decimal::from(50));
    assert_eq!(s.cash_expense, Decimal::from(35));
    assert_eq!(s.cash_balance, Decimal::from(15));
    assert_eq!(s.bank_balance, Decimal::ZERO);
}

#[test]
fn empty_ledger_is_all_zero() {
    let s = summarize(&[]);
    assert_eq!(s, Default::default());
    assert_eq!(running_balance(&[], Decimal::new(-250, 1)), Decimal::new(-250, 1));
}

#[test]
fn running_balance_starts_from_opening() {
    let txs = vec![
        tx(TxType::Income, 100, PaymentMode::Upi),
        tx(TxType::Expense, 40, PaymentMode::Bank),
    ];
    assert_eq!(running_balance(&txs, Decimal::from(500)), Decimal::from(560));

    let cashbook = Cashbook {
        id: "cb".into(),
        business_id: "b".into(),
        name: "Main".into(),
        default_mode: PaymentMode::Cash,
        opening_balance: Decimal::from(500),
    };
    let s = summarize_cashbook(&cashbook, &txs);
    assert_eq!(s.opening_balance, Decimal::from(500));
    assert_eq!(s.closing_balance, Decimal::from(560));
    assert_eq!(s.summary.net, Decimal::from(60));
}

#[test]
fn by_mode_nets_each_channel() {
    let txs = vec![
        tx(TxType::Income, 100, PaymentMode::Upi),
        tx(TxType::Expense, 30, PaymentMode::Upi),
        tx(TxType::Expense, 40, PaymentMode::Bank),
    ];
    let modes = by_mode(&txs);
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[&PaymentMode::Upi], Decimal::from(70));
    assert_eq!(modes[&PaymentMode::Bank], Decimal::from(-40));
    assert!(!modes.contains_key(&PaymentMode::Cash));
}

fn arb_tx() -> impl Strategy<Value = Transaction> {
    (
        prop_oneof![Just(TxType::Income), Just(TxType::Expense)],
        prop_oneof![
            Just(PaymentMode::Cash),
            Just(PaymentMode::Bank),
            Just(PaymentMode::Upi),
            Just(PaymentMode::CreditCard),
            Just(PaymentMode::DebitCard),
        ],
        1i64..1_000_000,
    )
        .prop_map(|(t, m, cents)| {
            let mut x = tx(t, 0, m);
            x.amount = Decimal::new(cents, 2);
            x
        })
}

proptest! {
    #[test]
    fn totals_are_consistent(txs in prop::collection::vec(arb_tx(), 0..40)) {
        let s = summarize(&txs);
        prop_assert_eq!(s.net, s.income - s.expense);
        prop_assert!(s.income >= Decimal::ZERO);
        prop_assert!(s.expense >= Decimal::ZERO);
        prop_assert_eq!(s.cash_balance + s.bank_balance, s.net);
        prop_assert_eq!(running_balance(&txs, Decimal::ZERO), s.net);
        prop_assert_eq!(by_mode(&txs).values().copied().sum::<Decimal>(), s.net);
    }

    #[test]
    fn summarize_is_idempotent(txs in prop::collection::vec(arb_tx(), 0..40)) {
        prop_assert_eq!(summarize(&txs), summarize(&txs));
    }
}

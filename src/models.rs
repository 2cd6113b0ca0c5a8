// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    Cash,
    Bank,
    Upi,
    CreditCard,
    DebitCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    #[default]
    Staff,
    Manager,
}

// "Credit Card", "credit-card" and "CREDIT_CARD" all normalize to "credit_card".
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['-', ' '], "_")
}

impl FromStr for TxType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "income" | "in" => Ok(TxType::Income),
            "expense" | "out" => Ok(TxType::Expense),
            _ => Err(Error::invalid(
                "type",
                format!("'{}' is not one of income|expense", s.trim()),
            )),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "cash" => Ok(PaymentMode::Cash),
            "bank" => Ok(PaymentMode::Bank),
            "upi" => Ok(PaymentMode::Upi),
            "credit_card" | "creditcard" => Ok(PaymentMode::CreditCard),
            "debit_card" | "debitcard" => Ok(PaymentMode::DebitCard),
            _ => Err(Error::invalid(
                "mode",
                format!(
                    "'{}' is not one of cash|bank|upi|credit_card|debit_card",
                    s.trim()
                ),
            )),
        }
    }
}

impl FromStr for StaffRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "staff" => Ok(StaffRole::Staff),
            "manager" => Ok(StaffRole::Manager),
            _ => Err(Error::invalid(
                "role",
                format!("'{}' is not one of staff|manager", s.trim()),
            )),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
        })
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Bank => "Bank",
            PaymentMode::Upi => "UPI",
            PaymentMode::CreditCard => "Credit Card",
            PaymentMode::DebitCard => "Debit Card",
        })
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StaffRole::Staff => "Staff",
            StaffRole::Manager => "Manager",
        })
    }
}

impl PaymentMode {
    /// Storage key, identical to the serde name.
    pub fn as_key(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Bank => "bank",
            PaymentMode::Upi => "upi",
            PaymentMode::CreditCard => "credit_card",
            PaymentMode::DebitCard => "debit_card",
        }
    }
}

impl TxType {
    pub fn as_key(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl StaffRole {
    pub fn as_key(&self) -> &'static str {
        match self {
            StaffRole::Staff => "staff",
            StaffRole::Manager => "manager",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cashbook {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub default_mode: PaymentMode,
    pub opening_balance: Decimal,
}

/// A ledger entry. Never modified after creation.
///
/// `category_id` is checked against the local registry when the entry is
/// recorded; entries fetched from the remote API may carry ids that do not
/// resolve to any known category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub cashbook_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub mode: PaymentMode,
    pub amount: Decimal,
    pub party: Option<String>,
    pub category_id: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub business_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub role: StaffRole,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBusiness {
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCashbook {
    pub name: String,
    pub default_mode: PaymentMode,
    pub opening_balance: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub tx_type: TxType,
}

#[derive(Debug, Clone, Default)]
pub struct NewStaff {
    pub name: String,
    pub role: StaffRole,
    pub phone: Option<String>,
}

/// Raw transaction input. Every field is optional so validation can name
/// the missing one instead of failing at parse time.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub date: Option<NaiveDate>,
    pub tx_type: Option<TxType>,
    pub mode: Option<PaymentMode>,
    pub amount: Option<Decimal>,
    pub party: Option<String>,
    pub category_id: Option<String>,
    pub note: Option<String>,
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage backends for the self-contained variant.
//!
//! Domain operations in [`crate::ledger`] and [`crate::registry`] only talk to
//! the [`Store`] trait. [`crate::db::SqliteStore`] persists to disk,
//! [`MemoryStore`] keeps everything in process and is what the tests use.

use crate::error::Result;
use crate::models::{Business, Cashbook, Category, Staff, Transaction};
use std::collections::HashMap;

/// Setting key holding the id of the active business.
pub const CURRENT_BUSINESS: &str = "current_business";
/// Setting key holding the remote API bearer token.
pub const TOKEN: &str = "token";
/// Setting key holding the remote user profile as JSON.
pub const USER: &str = "user";

/// Flat, append-only collections keyed by id.
///
/// Listing methods return records in insertion order, except
/// [`Store::transactions`] which returns the newest first.
pub trait Store {
    /// Stores a business together with its first cashbook. Either both are
    /// written or neither is.
    fn insert_business(&mut self, business: &Business, first_cashbook: &Cashbook) -> Result<()>;
    fn businesses(&self) -> Result<Vec<Business>>;
    fn business(&self, id: &str) -> Result<Option<Business>>;

    fn insert_cashbook(&mut self, cashbook: &Cashbook) -> Result<()>;
    fn cashbooks(&self, business_id: &str) -> Result<Vec<Cashbook>>;
    fn cashbook(&self, id: &str) -> Result<Option<Cashbook>>;

    fn insert_category(&mut self, category: &Category) -> Result<()>;
    fn categories(&self, business_id: &str) -> Result<Vec<Category>>;
    fn category(&self, id: &str) -> Result<Option<Category>>;

    fn insert_staff(&mut self, staff: &Staff) -> Result<()>;
    fn staff(&self, business_id: &str) -> Result<Vec<Staff>>;

    fn insert_transaction(&mut self, tx: &Transaction) -> Result<()>;
    fn transactions(&self, cashbook_id: &str) -> Result<Vec<Transaction>>;

    fn setting(&self, key: &str) -> Result<Option<String>>;
    fn set_setting(&mut self, key: &str, value: &str) -> Result<()>;
    fn clear_setting(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    businesses: Vec<Business>,
    cashbooks: Vec<Cashbook>,
    categories: Vec<Category>,
    staff: Vec<Staff>,
    transactions: Vec<Transaction>,
    settings: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn insert_business(&mut self, business: &Business, first_cashbook: &Cashbook) -> Result<()> {
        self.businesses.push(business.clone());
        self.cashbooks.push(first_cashbook.clone());
        Ok(())
    }

    fn businesses(&self) -> Result<Vec<Business>> {
        Ok(self.businesses.clone())
    }

    fn business(&self, id: &str) -> Result<Option<Business>> {
        Ok(self.businesses.iter().find(|b| b.id == id).cloned())
    }

    fn insert_cashbook(&mut self, cashbook: &Cashbook) -> Result<()> {
        self.cashbooks.push(cashbook.clone());
        Ok(())
    }

    fn cashbooks(&self, business_id: &str) -> Result<Vec<Cashbook>> {
        Ok(self
            .cashbooks
            .iter()
            .filter(|c| c.business_id == business_id)
            .cloned()
            .collect())
    }

    fn cashbook(&self, id: &str) -> Result<Option<Cashbook>> {
        Ok(self.cashbooks.iter().find(|c| c.id == id).cloned())
    }

    fn insert_category(&mut self, category: &Category) -> Result<()> {
        self.categories.push(category.clone());
        Ok(())
    }

    fn categories(&self, business_id: &str) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .iter()
            .filter(|c| c.business_id == business_id)
            .cloned()
            .collect())
    }

    fn category(&self, id: &str) -> Result<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    fn insert_staff(&mut self, staff: &Staff) -> Result<()> {
        self.staff.push(staff.clone());
        Ok(())
    }

    fn staff(&self, business_id: &str) -> Result<Vec<Staff>> {
        Ok(self
            .staff
            .iter()
            .filter(|s| s.business_id == business_id)
            .cloned()
            .collect())
    }

    fn insert_transaction(&mut self, tx: &Transaction) -> Result<()> {
        self.transactions.push(tx.clone());
        Ok(())
    }

    fn transactions(&self, cashbook_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .rev()
            .filter(|t| t.cashbook_id == cashbook_id)
            .cloned()
            .collect())
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.settings.get(key).cloned())
    }

    fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.settings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear_setting(&mut self, key: &str) -> Result<()> {
        self.settings.remove(key);
        Ok(())
    }
}

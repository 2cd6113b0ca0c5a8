// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Businesses and the records scoped under them. Create and list only.

use crate::error::{Error, Result};
use crate::models::{
    Business, Cashbook, Category, NewBusiness, NewCashbook, NewCategory, NewStaff, PaymentMode,
    Staff,
};
use crate::store::{CURRENT_BUSINESS, Store};
use rust_decimal::Decimal;
use tracing::info;

/// Name of the cashbook created together with every new business.
pub const DEFAULT_CASHBOOK: &str = "Main";

pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Creates a business, gives it a default cashbook and makes it active.
pub fn create_business(store: &mut dyn Store, input: NewBusiness) -> Result<Business> {
    let business = Business {
        id: new_id(),
        name: required("name", &input.name)?,
        tax_id: optional(input.tax_id),
        address: optional(input.address),
    };
    let main = Cashbook {
        id: new_id(),
        business_id: business.id.clone(),
        name: DEFAULT_CASHBOOK.to_string(),
        default_mode: PaymentMode::default(),
        opening_balance: Decimal::ZERO,
    };
    store.insert_business(&business, &main)?;
    store.set_setting(CURRENT_BUSINESS, &business.id)?;
    info!(id = %business.id, name = %business.name, "created business");
    Ok(business)
}

pub fn list_businesses(store: &dyn Store) -> Result<Vec<Business>> {
    store.businesses()
}

pub fn switch_business(store: &mut dyn Store, id: &str) -> Result<Business> {
    let business = require_business(store, id)?;
    store.set_setting(CURRENT_BUSINESS, &business.id)?;
    Ok(business)
}

/// The active business, if one has been created or selected.
///
/// A stale id (pointing at nothing) is treated as no selection.
pub fn active_business(store: &dyn Store) -> Result<Option<Business>> {
    match store.setting(CURRENT_BUSINESS)? {
        Some(id) => store.business(&id),
        None => Ok(None),
    }
}

pub fn require_business(store: &dyn Store, id: &str) -> Result<Business> {
    store
        .business(id)?
        .ok_or_else(|| Error::not_found("business", id))
}

pub fn create_cashbook(
    store: &mut dyn Store,
    business_id: &str,
    input: NewCashbook,
) -> Result<Cashbook> {
    require_business(store, business_id)?;
    let cashbook = Cashbook {
        id: new_id(),
        business_id: business_id.to_string(),
        name: required("name", &input.name)?,
        default_mode: input.default_mode,
        opening_balance: input.opening_balance,
    };
    store.insert_cashbook(&cashbook)?;
    Ok(cashbook)
}

pub fn list_cashbooks(store: &dyn Store, business_id: &str) -> Result<Vec<Cashbook>> {
    store.cashbooks(business_id)
}

pub fn create_category(
    store: &mut dyn Store,
    business_id: &str,
    input: NewCategory,
) -> Result<Category> {
    require_business(store, business_id)?;
    let category = Category {
        id: new_id(),
        business_id: business_id.to_string(),
        name: required("name", &input.name)?,
        tx_type: input.tx_type,
    };
    store.insert_category(&category)?;
    Ok(category)
}

pub fn list_categories(store: &dyn Store, business_id: &str) -> Result<Vec<Category>> {
    store.categories(business_id)
}

pub fn create_staff(store: &mut dyn Store, business_id: &str, input: NewStaff) -> Result<Staff> {
    require_business(store, business_id)?;
    let staff = Staff {
        id: new_id(),
        business_id: business_id.to_string(),
        name: required("name", &input.name)?,
        role: input.role,
        phone: optional(input.phone),
    };
    store.insert_staff(&staff)?;
    Ok(staff)
}

pub fn list_staff(store: &dyn Store, business_id: &str) -> Result<Vec<Staff>> {
    store.staff(business_id)
}

/// Looks a cashbook up by name (case-insensitive) within a business.
pub fn find_cashbook(store: &dyn Store, business_id: &str, name: &str) -> Result<Cashbook> {
    let wanted = name.trim();
    store
        .cashbooks(business_id)?
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| Error::not_found("cashbook", wanted))
}

pub fn find_category(store: &dyn Store, business_id: &str, name: &str) -> Result<Category> {
    let wanted = name.trim();
    store
        .categories(business_id)?
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| Error::not_found("category", wanted))
}

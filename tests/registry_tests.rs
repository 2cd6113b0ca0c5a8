// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::Error;
use cashbook::db::SqliteStore;
use cashbook::models::{NewBusiness, NewCashbook, NewCategory, NewStaff, PaymentMode, StaffRole, TxType};
use cashbook::registry::{self, DEFAULT_CASHBOOK};
use cashbook::store::{MemoryStore, Store};
use rust_decimal::Decimal;

fn named(name: &str) -> NewBusiness {
    NewBusiness {
        name: name.to_string(),
        ..NewBusiness::default()
    }
}

fn first_business_becomes_active(store: &mut dyn Store) {
    assert!(registry::active_business(store).unwrap().is_none());
    let acme = registry::create_business(store, named("  Acme ")).unwrap();
    assert_eq!(acme.name, "Acme");

    let all = registry::list_businesses(store).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(registry::active_business(store).unwrap(), Some(acme.clone()));

    let books = registry::list_cashbooks(store, &acme.id).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].name, DEFAULT_CASHBOOK);
    assert_eq!(books[0].opening_balance, Decimal::ZERO);
}

#[test]
fn first_business_becomes_active_in_memory() {
    first_business_becomes_active(&mut MemoryStore::new());
}

#[test]
fn first_business_becomes_active_in_sqlite() {
    first_business_becomes_active(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn new_business_takes_over_and_switch_goes_back() {
    let mut store = MemoryStore::new();
    let a = registry::create_business(&mut store, named("A")).unwrap();
    let b = registry::create_business(&mut store, named("B")).unwrap();
    assert_eq!(registry::active_business(&store).unwrap().unwrap().id, b.id);

    registry::switch_business(&mut store, &a.id).unwrap();
    assert_eq!(registry::active_business(&store).unwrap().unwrap().id, a.id);

    let names: Vec<String> = registry::list_businesses(&store)
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn switch_to_unknown_business_is_not_found() {
    let mut store = MemoryStore::new();
    let err = registry::switch_business(&mut store, "nope").unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "business", .. }));
}

#[test]
fn blank_business_name_is_rejected() {
    let mut store = MemoryStore::new();
    let err = registry::create_business(&mut store, named("   ")).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { field: "name", .. }));
    assert!(registry::list_businesses(&store).unwrap().is_empty());
}

#[test]
fn children_are_scoped_to_their_business() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let a = registry::create_business(
        &mut store,
        NewBusiness {
            name: "A".into(),
            tax_id: Some("29ABCDE1234F1Z5".into()),
            address: Some("  ".into()),
        },
    )
    .unwrap();
    assert_eq!(a.tax_id.as_deref(), Some("29ABCDE1234F1Z5"));
    assert_eq!(a.address, None);
    let b = registry::create_business(&mut store, named("B")).unwrap();

    let cb = registry::create_cashbook(
        &mut store,
        &a.id,
        NewCashbook {
            name: "Petty".into(),
            default_mode: PaymentMode::Upi,
            opening_balance: Decimal::new(-1050, 2),
        },
    )
    .unwrap();
    registry::create_category(
        &mut store,
        &a.id,
        NewCategory {
            name: "Rent".into(),
            tx_type: TxType::Expense,
        },
    )
    .unwrap();
    registry::create_staff(
        &mut store,
        &a.id,
        NewStaff {
            name: "Ravi".into(),
            role: StaffRole::Manager,
            phone: Some("98450 00000".into()),
        },
    )
    .unwrap();

    let a_books = registry::list_cashbooks(&store, &a.id).unwrap();
    assert_eq!(a_books.len(), 2);
    assert_eq!(a_books[1], cb);
    assert_eq!(registry::list_cashbooks(&store, &b.id).unwrap().len(), 1);

    assert_eq!(registry::list_categories(&store, &a.id).unwrap().len(), 1);
    assert!(registry::list_categories(&store, &b.id).unwrap().is_empty());

    let staff = registry::list_staff(&store, &a.id).unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].role, StaffRole::Manager);
    assert!(registry::list_staff(&store, &b.id).unwrap().is_empty());

    assert_eq!(registry::find_cashbook(&store, &a.id, "petty").unwrap().id, cb.id);
    assert_eq!(registry::find_category(&store, &a.id, " RENT ").unwrap().name, "Rent");
    assert!(registry::find_category(&store, &b.id, "Rent").is_err());
}

#[test]
fn children_need_an_existing_business() {
    let mut store = MemoryStore::new();
    let err = registry::create_staff(
        &mut store,
        "ghost",
        NewStaff {
            name: "Asha".into(),
            ..NewStaff::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn business_is_not_kept_when_its_cashbook_cannot_be_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cashbook.sqlite");
    let mut store = SqliteStore::open(&path).unwrap();

    let other = rusqlite::Connection::open(&path).unwrap();
    other
        .execute_batch(
            "CREATE TRIGGER reject_cashbooks BEFORE INSERT ON cashbooks
             BEGIN SELECT RAISE(ABORT, 'cashbooks are read-only'); END;",
        )
        .unwrap();
    drop(other);

    let err = registry::create_business(&mut store, named("Acme")).unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert!(registry::list_businesses(&store).unwrap().is_empty());
    assert_eq!(registry::active_business(&store).unwrap(), None);
}

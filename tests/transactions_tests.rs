// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::models::{NewBusiness, PaymentMode};
use cashbook::store::MemoryStore;
use cashbook::{cli, commands, ledger, registry};

fn run(store: &mut MemoryStore, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["cashbook"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("business", sub)) => commands::businesses::handle(store, sub),
        Some(("cashbook", sub)) => commands::cashbooks::handle(store, sub),
        Some(("category", sub)) => commands::categories::handle(store, sub),
        Some(("staff", sub)) => commands::staff::handle(store, sub),
        Some(("tx", sub)) => commands::transactions::handle(store, sub),
        Some(("report", sub)) => commands::reports::handle(store, sub),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

fn setup() -> MemoryStore {
    let mut store = MemoryStore::new();
    registry::create_business(
        &mut store,
        NewBusiness {
            name: "Acme".into(),
            ..NewBusiness::default()
        },
    )
    .unwrap();
    for day in 1..=3 {
        let date = format!("2025-01-0{}", day);
        run(
            &mut store,
            &["tx", "add", "--date", date.as_str(), "--type", "expense", "--amount", "10", "--party", "P"],
        )
        .unwrap();
    }
    store
}

#[test]
fn list_limit_respected() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from(["cashbook", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = commands::transactions::query_rows(&store, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date.to_string(), "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn add_without_amount_reports_the_field() {
    let mut store = setup();
    let err = run(&mut store, &["tx", "add", "--type", "income"]).unwrap_err();
    assert!(err.to_string().contains("amount"), "{err}");
    let err = run(&mut store, &["tx", "add", "--amount", "5"]).unwrap_err();
    assert!(err.to_string().contains("type"), "{err}");
}

#[test]
fn add_goes_to_named_cashbook_with_its_default_mode() {
    let mut store = setup();
    run(
        &mut store,
        &["cashbook", "add", "--name", "Savings", "--mode", "bank", "--opening", "-25.5"],
    )
    .unwrap();
    run(
        &mut store,
        &["tx", "add", "--cashbook", "savings", "--type", "income", "--amount", "100"],
    )
    .unwrap();

    let business = registry::active_business(&store).unwrap().unwrap();
    let savings = registry::find_cashbook(&store, &business.id, "Savings").unwrap();
    assert_eq!(savings.opening_balance.to_string(), "-25.5");
    let txs = ledger::list_transactions(&store, &savings.id).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].mode, PaymentMode::Bank);
}

#[test]
fn add_resolves_category_by_name() {
    let mut store = setup();
    run(&mut store, &["category", "add", "--name", "Sales", "--type", "income"]).unwrap();
    run(
        &mut store,
        &["tx", "add", "--type", "income", "--amount", "3", "--category", "sales"],
    )
    .unwrap();
    assert!(run(
        &mut store,
        &["tx", "add", "--type", "income", "--amount", "3", "--category", "Nope"],
    )
    .is_err());

    let business = registry::active_business(&store).unwrap().unwrap();
    let sales = registry::find_category(&store, &business.id, "Sales").unwrap();
    let main = registry::find_cashbook(&store, &business.id, "Main").unwrap();
    let txs = ledger::list_transactions(&store, &main.id).unwrap();
    assert_eq!(txs.len(), 4);
    assert_eq!(txs[0].category_id.as_deref(), Some(sales.id.as_str()));
}

#[test]
fn business_use_switches_scope() {
    let mut store = setup();
    run(&mut store, &["business", "add", "--name", "Second"]).unwrap();
    assert_eq!(registry::active_business(&store).unwrap().unwrap().name, "Second");
    run(&mut store, &["business", "use", "--name", "acme"]).unwrap();
    assert_eq!(registry::active_business(&store).unwrap().unwrap().name, "Acme");
    assert!(run(&mut store, &["business", "use", "--name", "Missing"]).is_err());
}

#[test]
fn commands_need_an_active_business() {
    let mut store = MemoryStore::new();
    let err = run(&mut store, &["staff", "add", "--name", "Asha"]).unwrap_err();
    assert!(err.to_string().contains("No active business"));
    run(&mut store, &["business", "add", "--name", "Acme"]).unwrap();
    run(&mut store, &["staff", "add", "--name", "Asha", "--role", "manager"]).unwrap();
    run(&mut store, &["report", "summary", "--json"]).unwrap();
}

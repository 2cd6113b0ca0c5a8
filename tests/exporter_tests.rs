// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::export::{REPORT_TITLE, render_html, write_csv, write_json};
use cashbook::models::{NewBusiness, NewTransaction, PaymentMode, Transaction, TxType};
use cashbook::store::MemoryStore;
use cashbook::{cli, commands::exporter, export, ledger, registry};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn tx(tx_type: TxType, amount: Decimal, party: &str, note: &str) -> Transaction {
    Transaction {
        id: "t".into(),
        cashbook_id: "cb".into(),
        date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        tx_type,
        mode: PaymentMode::Bank,
        amount,
        party: Some(party.to_string()).filter(|s| !s.is_empty()),
        category_id: None,
        note: Some(note.to_string()).filter(|s| !s.is_empty()),
    }
}

fn csv_string(txs: &[Transaction]) -> String {
    let mut buf = Vec::new();
    write_csv(txs, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn csv_quotes_every_field() {
    let out = csv_string(&[
        tx(TxType::Income, Decimal::from(100), "Acme, Ltd", "said \"hi\""),
        tx(TxType::Expense, Decimal::new(4050, 2), "", ""),
    ]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        r#""Date","Type","Mode","Amount","Party","Note""#
    );
    assert_eq!(
        lines[1],
        r#""2025-01-02","Income","Bank","100","Acme, Ltd","said ""hi""""#
    );
    assert_eq!(lines[2], r#""2025-01-02","Expense","Bank","40.50","","""#);
    assert_eq!(lines.len(), 3);
}

#[test]
fn csv_round_trips_rows_and_amounts() {
    let txs = vec![
        tx(TxType::Income, Decimal::new(12345, 2), "A", "line one"),
        tx(TxType::Expense, Decimal::from(7), "B", ""),
        tx(TxType::Income, Decimal::new(1, 3), "C", "x,y"),
    ];
    let out = csv_string(&txs);
    let mut rdr = csv::Reader::from_reader(out.as_bytes());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), txs.len());
    for (row, t) in rows.iter().zip(&txs) {
        assert_eq!(row[3].parse::<Decimal>().unwrap(), t.amount);
        assert_eq!(&row[1], t.tx_type.to_string());
    }
}

#[test]
fn header_only_for_empty_ledger() {
    assert_eq!(
        csv_string(&[]),
        "\"Date\",\"Type\",\"Mode\",\"Amount\",\"Party\",\"Note\"\n"
    );
}

#[test]
fn html_report_escapes_and_formats() {
    let html = render_html(
        &[tx(
            TxType::Expense,
            Decimal::new(123456789, 2),
            "<Tom & Jerry>",
            "",
        )],
        REPORT_TITLE,
    );
    assert!(html.contains("<title>Cashbook Report</title>"));
    assert!(html.contains("&lt;Tom &amp; Jerry&gt;"));
    assert!(html.contains("&#8377;12,34,567.89"));
    assert!(html.contains("class=\"expense\""));
    assert!(!html.contains("No entries yet"));
}

#[test]
fn html_report_marks_empty_ledger() {
    let html = render_html(&[], "Q1 <draft>");
    assert!(html.contains("<h1>Q1 &lt;draft&gt;</h1>"));
    assert!(html.contains("No entries yet"));
}

#[test]
fn json_export_is_an_array_of_transactions() {
    let mut buf = Vec::new();
    let txs = vec![tx(TxType::Income, Decimal::from(5), "P", "")];
    write_json(&txs, &mut buf).unwrap();
    let parsed: Vec<Transaction> = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed, txs);
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    let b = registry::create_business(
        &mut store,
        NewBusiness {
            name: "Acme".into(),
            ..NewBusiness::default()
        },
    )
    .unwrap();
    let cb = registry::list_cashbooks(&store, &b.id).unwrap().remove(0);
    ledger::add_transaction(
        &mut store,
        &cb.id,
        NewTransaction {
            date: NaiveDate::from_ymd_opt(2025, 1, 2),
            tx_type: Some(TxType::Income),
            amount: Some(Decimal::new(1234, 2)),
            party: Some("Corner Shop".into()),
            ..NewTransaction::default()
        },
    )
    .unwrap();
    store
}

#[test]
fn export_command_writes_csv_file() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("report.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "cashbook",
        "export",
        "transactions",
        "--out",
        out_str.as_str(),
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&store, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        contents,
        "\"Date\",\"Type\",\"Mode\",\"Amount\",\"Party\",\"Note\"\n\
         \"2025-01-02\",\"Income\",\"Cash\",\"12.34\",\"Corner Shop\",\"\"\n"
    );
}

#[test]
fn export_command_rejects_unknown_format() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "cashbook",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        out_str.as_str(),
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&store, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}

#[test]
fn default_output_name_follows_format() {
    assert_eq!(export::default_filename("csv"), export::CSV_FILENAME);
    assert_eq!(export::default_filename("html"), "cashbook-report.html");
    assert_eq!(export::default_filename("json"), "cashbook-report.json");
}

// Only test in this file that relies on the working directory.
#[test]
fn html_export_without_out_writes_html_file() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let prev = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let matches =
        cli::build_cli().get_matches_from(["cashbook", "export", "transactions", "--format", "html"]);
    let result = match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(&store, export_m),
        _ => panic!("no export subcommand"),
    };
    std::env::set_current_dir(prev).unwrap();
    result.unwrap();

    let html = std::fs::read_to_string(dir.path().join("cashbook-report.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!dir.path().join("cashbook-report.csv").exists());
}

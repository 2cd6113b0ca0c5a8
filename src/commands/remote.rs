// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! `cashbook remote ...`: the same operations against the hosted API.

use super::{exporter, reports, transaction_input, transactions::print_table};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{
    Category, NewBusiness, NewCashbook, NewCategory, PaymentMode, StaffRole, Transaction, TxType,
};
use crate::session;
use crate::store::Store;
use crate::utils::{fmt_inr, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use tracing::info;

fn arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> &'a str {
    sub.get_one::<String>(id).map(|s| s.trim()).unwrap_or("")
}

pub fn handle(store: &mut dyn Store, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let mut client = ApiClient::new(&config.api_url)?;
            let s = client
                .login(arg(sub, "email"), arg(sub, "password"))
                .context("Login failed")?;
            session::save(store, &s)?;
            println!("Logged in as {}", s.display_name());
        }
        Some(("register", sub)) => {
            let mut client = ApiClient::new(&config.api_url)?;
            let s = client
                .register(arg(sub, "name"), arg(sub, "email"), arg(sub, "password"))
                .context("Registration failed")?;
            session::save(store, &s)?;
            println!("Registered and logged in as {}", s.display_name());
        }
        Some(("logout", _)) => {
            let mut client = session::client(store, &config.api_url)?;
            let res = client.logout();
            session::clear(store)?;
            res.context("Server rejected logout; local session cleared anyway")?;
            println!("Logged out");
        }
        Some(("whoami", _)) => match session::load(store)? {
            Some(s) => println!("{} @ {}", s.display_name(), config.api_url),
            None => println!("Not logged in"),
        },
        Some(("business", sub)) => business(&session::client(store, &config.api_url)?, sub)?,
        Some(("cashbook", sub)) => cashbook(&session::client(store, &config.api_url)?, sub)?,
        Some(("category", sub)) => category(&session::client(store, &config.api_url)?, sub)?,
        Some(("staff", sub)) => staff(&session::client(store, &config.api_url)?, sub)?,
        Some(("tx", sub)) => tx(&session::client(store, &config.api_url)?, sub)?,
        Some(("summary", sub)) => {
            let client = session::client(store, &config.api_url)?;
            let business_id = arg(sub, "business");
            let cashbook_id = arg(sub, "cashbook");
            let cashbook = client
                .list_cashbooks(business_id)?
                .into_iter()
                .find(|c| c.id == cashbook_id)
                .with_context(|| format!("Cashbook '{}' not found in business", cashbook_id))?;
            let txs = client.list_transactions(&cashbook.id)?;
            reports::print_summary(&cashbook, &txs, sub)?;
        }
        Some(("export", sub)) => {
            let client = session::client(store, &config.api_url)?;
            let txs = client.list_transactions(arg(sub, "cashbook"))?;
            exporter::write_report(&txs, sub)?;
        }
        _ => {}
    }
    Ok(())
}

fn business(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let b = client.create_business(&NewBusiness {
                name: arg(sub, "name").to_string(),
                tax_id: sub.get_one::<String>("tax_id").cloned(),
                address: sub.get_one::<String>("address").cloned(),
            })?;
            info!(id = %b.id, "created remote business");
            println!("Added business '{}' ({})", b.name, b.id);
        }
        Some(("list", sub)) => {
            let list = client.list_businesses()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|b| vec![b.id, b.name, b.tax_id.unwrap_or_default()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "GSTIN"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

fn cashbook(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = NewCashbook {
                name: arg(sub, "name").to_string(),
                default_mode: arg(sub, "mode").parse::<PaymentMode>()?,
                opening_balance: parse_decimal(arg(sub, "opening"))?,
            };
            let c = client.create_cashbook(arg(sub, "business"), &input)?;
            println!("Added cashbook '{}' ({})", c.name, c.id);
        }
        Some(("list", sub)) => {
            let list = client.list_cashbooks(arg(sub, "business"))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.id,
                            c.name,
                            c.default_mode.to_string(),
                            fmt_inr(&c.opening_balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Default Mode", "Opening"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn category(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = NewCategory {
                name: arg(sub, "name").to_string(),
                tx_type: arg(sub, "type").parse::<TxType>()?,
            };
            let c = client.create_category(arg(sub, "business"), &input)?;
            println!("Added {} category '{}' ({})", c.tx_type, c.name, c.id);
        }
        Some(("list", sub)) => {
            let list = client.list_categories(arg(sub, "business"))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|c| vec![c.id, c.name, c.tx_type.to_string()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Category", "Type"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

fn staff(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let role = arg(sub, "role").parse::<StaffRole>()?;
            let s = client.create_staff(arg(sub, "business"), arg(sub, "email"), role)?;
            println!("Added {} '{}'", s.role, s.name);
        }
        Some(("list", sub)) => {
            let list = client.list_staff(arg(sub, "business"))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|s| vec![s.name, s.role.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Member", "Role"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

fn tx(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut input = transaction_input(sub)?;
            // Remote categories are passed through by id.
            input.category_id = sub.get_one::<String>("category").cloned();
            let t = client.create_transaction(arg(sub, "cashbook"), &input)?;
            println!(
                "Recorded {} of {} ({}) on {}",
                t.tx_type,
                fmt_inr(&t.amount),
                t.mode,
                t.date
            );
        }
        Some(("list", sub)) => {
            let (list, cats) = fetch_transactions(client, sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                print_table(list.iter(), &cats);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Transactions of `--cashbook`, plus the categories of `--business` when it
/// is given so the table can show names instead of ids.
pub fn fetch_transactions(
    client: &ApiClient,
    sub: &clap::ArgMatches,
) -> Result<(Vec<Transaction>, Vec<Category>)> {
    let list = client.list_transactions(arg(sub, "cashbook"))?;
    let cats = match sub.get_one::<String>("business").map(|s| s.trim()) {
        Some(id) if !id.is_empty() => client.list_categories(id)?,
        _ => Vec::new(),
    };
    Ok((list, cats))
}

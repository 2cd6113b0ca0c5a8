// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::current_business;
use crate::models::{NewCashbook, PaymentMode};
use crate::registry;
use crate::store::Store;
use crate::utils::{fmt_inr, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let business = current_business(store)?;
            let input = NewCashbook {
                name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
                default_mode: sub
                    .get_one::<String>("mode")
                    .map(|s| s.parse::<PaymentMode>())
                    .transpose()?
                    .unwrap_or_default(),
                opening_balance: parse_decimal(
                    sub.get_one::<String>("opening").map(|s| s.as_str()).unwrap_or("0"),
                )?,
            };
            let c = registry::create_cashbook(store, &business.id, input)?;
            println!(
                "Added cashbook '{}' to {} (mode {}, opening {})",
                c.name, business.name, c.default_mode, c.opening_balance
            );
        }
        Some(("list", sub)) => {
            let business = current_business(store)?;
            let list = registry::list_cashbooks(store, &business.id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.name,
                            c.default_mode.to_string(),
                            fmt_inr(&c.opening_balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Cashbook", "Default Mode", "Opening"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

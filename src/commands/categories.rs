// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::current_business;
use crate::models::{NewCategory, TxType};
use crate::registry;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let business = current_business(store)?;
            let input = NewCategory {
                name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
                tx_type: sub
                    .get_one::<String>("type")
                    .map(|s| s.as_str())
                    .unwrap_or("expense")
                    .parse::<TxType>()?,
            };
            let c = registry::create_category(store, &business.id, input)?;
            println!("Added {} category '{}'", c.tx_type, c.name);
        }
        Some(("list", sub)) => {
            let business = current_business(store)?;
            let list = registry::list_categories(store, &business.id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|c| vec![c.name, c.tx_type.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Category", "Type"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

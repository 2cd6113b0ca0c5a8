// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewBusiness;
use crate::registry;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = NewBusiness {
                name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
                tax_id: sub.get_one::<String>("tax_id").cloned(),
                address: sub.get_one::<String>("address").cloned(),
            };
            let b = registry::create_business(store, input)?;
            println!("Added business '{}' (now active)", b.name);
        }
        Some(("list", sub)) => {
            let active = registry::active_business(store)?.map(|b| b.id);
            let list = registry::list_businesses(store)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|b| {
                        let marker = if active.as_deref() == Some(b.id.as_str()) {
                            "*".to_string()
                        } else {
                            String::new()
                        };
                        vec![
                            marker,
                            b.name,
                            b.tax_id.unwrap_or_default(),
                            b.address.unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["", "Name", "Tax ID", "Address"], rows)
                );
            }
        }
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").map(|s| s.trim()).unwrap_or("");
            let found = registry::list_businesses(store)?
                .into_iter()
                .find(|b| b.name.eq_ignore_ascii_case(name) || b.id == name)
                .ok_or_else(|| anyhow!("Business '{}' not found", name))?;
            let b = registry::switch_business(store, &found.id)?;
            println!("Switched to business '{}'", b.name);
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::current_business;
use crate::models::{NewStaff, StaffRole};
use crate::registry;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let business = current_business(store)?;
            let input = NewStaff {
                name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
                role: sub
                    .get_one::<String>("role")
                    .map(|s| s.parse::<StaffRole>())
                    .transpose()?
                    .unwrap_or_default(),
                phone: sub.get_one::<String>("phone").cloned(),
            };
            let s = registry::create_staff(store, &business.id, input)?;
            println!("Added {} '{}' to {}", s.role, s.name, business.name);
        }
        Some(("list", sub)) => {
            let business = current_business(store)?;
            let list = registry::list_staff(store, &business.id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .into_iter()
                    .map(|s| vec![s.name, s.role.to_string(), s.phone.unwrap_or_default()])
                    .collect();
                println!("{}", pretty_table(&["Name", "Role", "Phone"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

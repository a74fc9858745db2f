// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::ExpenseCategory;
use crate::store::{KeyValueStore, Storage};
use crate::utils::pretty_table;
use anyhow::{Result, bail};

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            if add_category(store, name)? {
                println!("Added category '{}'", name.trim());
            } else {
                println!("Category '{}' already exists", name.trim());
            }
        }
        Some(("list", _)) => {
            let data = all_categories(store)?
                .into_iter()
                .map(|c| vec![c])
                .collect();
            println!("{}", pretty_table(&["Category"], data));
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_accounts<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            if add_account(store, name)? {
                println!("Added account '{}'", name.trim());
            } else {
                println!("Account '{}' already exists", name.trim());
            }
        }
        Some(("list", _)) => {
            let data = store.accounts()?.into_iter().map(|a| vec![a]).collect();
            println!("{}", pretty_table(&["Account"], data));
        }
        _ => {}
    }
    Ok(())
}

/// Built-in expense categories followed by custom ones.
pub fn all_categories<S: KeyValueStore>(store: &Storage<S>) -> Result<Vec<String>> {
    let mut out: Vec<String> = ExpenseCategory::ALL
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();
    for c in store.categories()? {
        if !out.iter().any(|o| o.eq_ignore_ascii_case(&c)) {
            out.push(c);
        }
    }
    Ok(out)
}

/// Returns false when the name is already known.
pub fn add_category<S: KeyValueStore>(store: &Storage<S>, name: &str) -> Result<bool> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Category name must not be blank");
    }
    if all_categories(store)?
        .iter()
        .any(|c| c.eq_ignore_ascii_case(name))
    {
        return Ok(false);
    }
    let mut custom = store.categories()?;
    custom.push(name.to_string());
    store.set_categories(&custom)?;
    Ok(true)
}

pub fn add_account<S: KeyValueStore>(store: &Storage<S>, name: &str) -> Result<bool> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Account name must not be blank");
    }
    let mut accounts = store.accounts()?;
    if accounts.iter().any(|a| a.eq_ignore_ascii_case(name)) {
        return Ok(false);
    }
    accounts.push(name.to_string());
    store.set_accounts(&accounts)?;
    Ok(true)
}

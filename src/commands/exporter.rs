// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::register_rows;
use crate::error::BuddyError;
use crate::store::{KeyValueStore, Storage};
use crate::utils::fmt_money;
use anyhow::{Context, Result};

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();

    let rows = register_rows(store.transactions()?);

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "id", "date", "account", "category", "payee", "type", "amount", "balance",
            ])?;
            for r in &rows {
                let amount = r.amount.to_string();
                let balance = fmt_money(&r.balance);
                wtr.write_record([
                    r.id.as_str(),
                    r.date.as_str(),
                    r.account.as_str(),
                    r.category.as_str(),
                    r.payee.as_str(),
                    r.kind.as_str(),
                    amount.as_str(),
                    balance.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => return Err(BuddyError::UnknownFormat(fmt.clone()).into()),
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

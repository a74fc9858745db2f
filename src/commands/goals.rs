// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BuddyError;
use crate::models::SavingGoal;
use crate::rows::next_id;
use crate::store::{KeyValueStore, Storage};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rust_decimal::Decimal;

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let g = add(store, sub)?;
            println!("Added goal '{}' targeting {}", g.name, fmt_money(&g.target));
        }
        Some(("fund", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let g = fund(store, name, amount)?;
            println!(
                "'{}' now at {} of {} ({})",
                g.name,
                fmt_money(&g.saved),
                fmt_money(&g.target),
                fmt_percent(&g.progress())
            );
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            remove(store, name)?;
            println!("Removed goal '{}'", name.trim());
        }
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<SavingGoal> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let saved = match sub.get_one::<String>("saved") {
        Some(s) => parse_decimal(s)?,
        None => Decimal::ZERO,
    };
    let deadline = sub
        .get_one::<String>("deadline")
        .map(|d| parse_date(d.trim()).map(|d| d.to_string()))
        .transpose()?;

    let mut goals = store.saving_goals()?;
    if goals.iter().any(|g| g.name.eq_ignore_ascii_case(&name)) {
        bail!("Saving goal '{}' already exists", name);
    }
    let g = SavingGoal {
        id: next_id("goal", goals.iter().map(|g| g.id.as_str())),
        name,
        target,
        saved,
        deadline,
    };
    goals.push(g.clone());
    store.set_saving_goals(&goals)?;
    Ok(g)
}

/// Add `amount` to a goal's saved balance; negative amounts withdraw, never below zero.
pub fn fund<S: KeyValueStore>(store: &Storage<S>, name: &str, amount: Decimal) -> Result<SavingGoal> {
    let mut goals = store.saving_goals()?;
    let name = name.trim();
    let g = goals
        .iter_mut()
        .find(|g| g.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| BuddyError::UnknownGoal(name.to_string()))?;
    g.saved = (g.saved + amount).max(Decimal::ZERO);
    let updated = g.clone();
    store.set_saving_goals(&goals)?;
    Ok(updated)
}

pub fn remove<S: KeyValueStore>(store: &Storage<S>, name: &str) -> Result<()> {
    let mut goals = store.saving_goals()?;
    let name = name.trim();
    let before = goals.len();
    goals.retain(|g| !g.name.eq_ignore_ascii_case(name));
    if goals.len() == before {
        return Err(BuddyError::UnknownGoal(name.to_string()).into());
    }
    store.set_saving_goals(&goals)
}

fn list<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let goals = store.saving_goals()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        return Ok(());
    }
    let rows = goals
        .iter()
        .map(|g| {
            vec![
                g.name.clone(),
                fmt_money(&g.saved),
                fmt_money(&g.target),
                fmt_percent(&g.progress()),
                fmt_money(&g.remaining()),
                g.deadline.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Goal", "Saved", "Target", "Progress", "Remaining", "Deadline"],
            rows
        )
    );
    Ok(())
}

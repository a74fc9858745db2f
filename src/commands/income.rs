// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::Income;
use crate::rows::{insert_after, next_id, remove_at, row_mut};
use crate::store::{KeyValueStore, Storage};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let inc = add(store, sub)?;
            println!(
                "Recorded income {} from '{}' on {}",
                fmt_money(&inc.amount),
                inc.source,
                inc.date
            );
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let index = *sub.get_one::<usize>("index").unwrap();
            match remove(store, index)? {
                Some(inc) => println!("Removed income '{}'", inc.source),
                None => println!("Kept the last income row"),
            }
        }
        Some(("set", sub)) => {
            let inc = set(store, sub)?;
            println!("Updated income '{}'", inc.id);
        }
        _ => {}
    }
    Ok(())
}

pub fn add<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<Income> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let source = sub.get_one::<String>("source").unwrap().trim().to_string();

    let mut incomes = store.income()?;
    let inc = Income {
        id: next_id("inc", incomes.iter().map(|i| i.id.as_str())),
        source,
        amount,
        date: date.to_string(),
    };
    let at = sub.get_one::<usize>("after").copied().unwrap_or(usize::MAX);
    insert_after(&mut incomes, at, inc.clone());
    store.set_income(&incomes)?;
    Ok(inc)
}

pub fn remove<S: KeyValueStore>(store: &Storage<S>, index: usize) -> Result<Option<Income>> {
    let mut incomes = store.income()?;
    let removed = remove_at(&mut incomes, index)?;
    if removed.is_some() {
        store.set_income(&incomes)?;
    }
    Ok(removed)
}

pub fn set<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<Income> {
    let index = *sub.get_one::<usize>("index").unwrap();
    let mut incomes = store.income()?;
    let row = row_mut(&mut incomes, index)?;
    if let Some(source) = sub.get_one::<String>("source") {
        row.source = source.trim().to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        row.amount = parse_decimal(amount)?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        row.date = parse_date(date.trim())?.to_string();
    }
    let updated = row.clone();
    store.set_income(&incomes)?;
    Ok(updated)
}

fn list<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let incomes = store.income()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &incomes)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = incomes
        .iter()
        .enumerate()
        .map(|(i, inc)| {
            vec![
                i.to_string(),
                inc.source.clone(),
                fmt_money(&inc.amount),
                inc.date.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["#", "Source", "Amount", "Date"], rows)
    );
    println!("Total Income: {}", fmt_money(&ledger::total(&incomes)));
    Ok(())
}

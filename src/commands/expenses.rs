// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{Expense, ExpenseCategory, ExpenseKind};
use crate::rows::{insert_after, next_id, remove_at, row_mut};
use crate::store::{KeyValueStore, Storage};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let e = add(store, sub)?;
            println!(
                "Recorded {} expense {} for {} on {}",
                if e.kind == ExpenseKind::Fixed {
                    "fixed"
                } else {
                    "discretionary"
                },
                fmt_money(&e.amount),
                e.category,
                e.date
            );
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let index = *sub.get_one::<usize>("index").unwrap();
            let mut expenses = store.expenses()?;
            match remove_at(&mut expenses, index)? {
                Some(e) => {
                    store.set_expenses(&expenses)?;
                    println!("Removed {} expense {}", e.category, fmt_money(&e.amount));
                }
                None => println!("Kept the last expense row"),
            }
        }
        Some(("set", sub)) => {
            let e = set(store, sub)?;
            println!("Updated expense '{}'", e.id);
        }
        _ => {}
    }
    Ok(())
}

pub fn add<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<Expense> {
    let category: ExpenseCategory = sub.get_one::<String>("category").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let kind = if sub.get_flag("fixed") {
        ExpenseKind::Fixed
    } else {
        ExpenseKind::Discretionary
    };

    let mut expenses = store.expenses()?;
    let e = Expense {
        id: next_id("exp", expenses.iter().map(|e| e.id.as_str())),
        category,
        amount,
        date: date.to_string(),
        kind,
    };
    let at = sub.get_one::<usize>("after").copied().unwrap_or(usize::MAX);
    insert_after(&mut expenses, at, e.clone());
    store.set_expenses(&expenses)?;
    Ok(e)
}

pub fn set<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<Expense> {
    let index = *sub.get_one::<usize>("index").unwrap();
    let mut expenses = store.expenses()?;
    let row = row_mut(&mut expenses, index)?;
    if let Some(category) = sub.get_one::<String>("category") {
        row.category = category.parse()?;
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        row.amount = parse_decimal(amount)?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        row.date = parse_date(date.trim())?.to_string();
    }
    if sub.get_flag("fixed") {
        row.kind = ExpenseKind::Fixed;
    } else if sub.get_flag("discretionary") {
        row.kind = ExpenseKind::Discretionary;
    }
    let updated = row.clone();
    store.set_expenses(&expenses)?;
    Ok(updated)
}

/// Expenses filtered by the `--fixed` / `--discretionary` switches.
pub fn query_rows<S: KeyValueStore>(
    store: &Storage<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<Expense>> {
    let wanted = if sub.get_flag("fixed") {
        Some(ExpenseKind::Fixed)
    } else if sub.get_flag("discretionary") {
        Some(ExpenseKind::Discretionary)
    } else {
        None
    };
    Ok(store
        .expenses()?
        .into_iter()
        .filter(|e| wanted.is_none_or(|k| e.kind == k))
        .collect())
}

fn list<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.category.to_string(),
                fmt_money(&e.amount),
                e.date.clone(),
                format!("{:?}", e.kind).to_lowercase(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Category", "Amount", "Date", "Kind"], rows)
    );
    println!("Total: {}", fmt_money(&ledger::total(&data)));
    Ok(())
}

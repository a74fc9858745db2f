// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, Overview};
use crate::models::{CategoryTotal, money};
use crate::store::{KeyValueStore, Storage};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BalanceSummary {
    pub transactions: usize,
    #[serde(with = "money")]
    pub balance: Decimal,
}

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => overview(store, sub)?,
        Some(("by-category", sub)) => by_category(store, sub)?,
        Some(("balance", sub)) => balance(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn monthly_overview<S: KeyValueStore>(store: &Storage<S>) -> Result<Overview> {
    Ok(ledger::overview(&store.income()?, &store.expenses()?))
}

fn overview<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let o = monthly_overview(store)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &o)? {
        return Ok(());
    }
    let share = o
        .spent_share
        .as_ref()
        .map(fmt_percent)
        .unwrap_or_else(|| "-".into());
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Remaining", "Spent"],
            vec![vec![
                fmt_money(&o.income),
                fmt_money(&o.expenses),
                fmt_money(&o.remaining),
                share,
            ]],
        )
    );
    Ok(())
}

/// Category totals from expenses or from expense-type transactions.
pub fn category_totals<S: KeyValueStore>(
    store: &Storage<S>,
    source: &str,
) -> Result<Vec<CategoryTotal>> {
    Ok(match source {
        "transactions" => ledger::transaction_spend_by_category(&store.transactions()?),
        _ => ledger::aggregate_by_category(&store.expenses()?),
    })
}

fn by_category<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let source = sub
        .get_one::<String>("source")
        .map(String::as_str)
        .unwrap_or("expenses");
    let data = category_totals(store, source)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    // Shares are of total income, like the spending pie.
    let denominator = store.total_income()?;
    let rows = data
        .iter()
        .map(|c| {
            let share = if denominator.is_zero() {
                "-".to_string()
            } else {
                fmt_percent(&(c.amount / denominator))
            };
            vec![c.category.clone(), fmt_money(&c.amount), share]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Of income"], rows)
    );
    println!("Total: {}", fmt_money(&ledger::total(&data)));
    Ok(())
}

fn balance<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let txs = store.transactions()?;
    let end = ledger::running_balances(&txs)
        .last()
        .copied()
        .unwrap_or(Decimal::ZERO);
    let v = BalanceSummary {
        transactions: txs.len(),
        balance: end,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Transactions", "Balance"],
            vec![vec![txs.len().to_string(), fmt_money(&end)]],
        )
    );
    Ok(())
}

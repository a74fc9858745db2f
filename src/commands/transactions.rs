// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::categories::{add_account, add_category};
use crate::error::BuddyError;
use crate::ledger::running_balances;
use crate::models::{Amount, Transaction, TxKind, money};
use crate::rows::{
    TxPatch, apply_direction, apply_patch, commit, edit_amount, ensure_complete, find_tx_mut,
    next_id, payee_suggestions, remove_at,
};
use crate::store::{KeyValueStore, Storage};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let tx = add(store, sub)?;
            println!(
                "Recorded {} on {} at '{}' (acct: {})",
                tx.amount, tx.date, tx.payee, tx.account
            );
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            match remove(store, id)? {
                Some(tx) => println!("Removed transaction {}", tx.id),
                None => println!("Kept the last transaction row"),
            }
        }
        Some(("payees", _)) => {
            let data = payee_suggestions(&store.transactions()?)
                .into_iter()
                .map(|p| vec![p])
                .collect();
            println!("{}", pretty_table(&["Payee"], data));
        }
        Some(("set", sub)) => {
            let tx = set(store, sub)?;
            println!("Updated {}: {} '{}' {}", tx.id, tx.date, tx.payee, tx.amount);
        }
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<Transaction> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let account = sub.get_one::<String>("account").unwrap().trim().to_string();
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let payee = sub.get_one::<String>("payee").unwrap().to_string();
    let amount_text = sub.get_one::<String>("amount").unwrap().trim();
    let kind = if sub.get_flag("income") {
        TxKind::Income
    } else {
        TxKind::Expense
    };

    let mut txs = store.transactions()?;
    let mut tx = Transaction {
        id: next_id("tx", txs.iter().map(|t| t.id.as_str())),
        date: date.to_string(),
        account,
        category,
        payee,
        amount: Amount::default(),
        kind,
    };
    edit_amount(&mut tx, amount_text)?;
    commit(&mut tx);
    ensure_complete(&tx)?;
    apply_direction(&mut tx);

    remember(store, &tx)?;
    txs.push(tx.clone());
    store.set_transactions(&txs)?;
    Ok(tx)
}

/// Record unseen account and category names so later rows can pick them.
fn remember<S: KeyValueStore>(store: &Storage<S>, tx: &Transaction) -> Result<()> {
    add_account(store, &tx.account)?;
    add_category(store, &tx.category)?;
    Ok(())
}

/// Remove a transaction by id. The last remaining row is kept.
pub fn remove<S: KeyValueStore>(store: &Storage<S>, id: &str) -> Result<Option<Transaction>> {
    let mut txs = store.transactions()?;
    let index = txs
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| BuddyError::UnknownTransaction(id.to_string()))?;
    let removed = remove_at(&mut txs, index)?;
    if removed.is_some() {
        store.set_transactions(&txs)?;
    }
    Ok(removed)
}

pub fn set<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = sub.get_one::<String>("id").unwrap();
    let patch = TxPatch {
        date: sub
            .get_one::<String>("date")
            .map(|d| parse_date(d.trim()).map(|d| d.to_string()))
            .transpose()?,
        account: sub.get_one::<String>("account").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        payee: sub.get_one::<String>("payee").cloned(),
        amount: sub.get_one::<String>("amount").map(|s| s.trim().to_string()),
        draft: sub.get_flag("draft"),
    };
    let mut txs = store.transactions()?;
    let tx = find_tx_mut(&mut txs, id)?;
    apply_patch(tx, &patch)?;
    let updated = tx.clone();
    store.set_transactions(&txs)?;
    Ok(updated)
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub account: String,
    pub category: String,
    pub payee: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Amount,
    #[serde(with = "money")]
    pub balance: Decimal,
}

/// Pair each transaction with the running balance after it.
pub fn register_rows(txs: Vec<Transaction>) -> Vec<TransactionRow> {
    let balances = running_balances(&txs);
    txs.into_iter()
        .zip(balances)
        .map(|(t, balance)| TransactionRow {
            id: t.id,
            date: t.date,
            account: t.account,
            category: t.category,
            payee: t.payee,
            kind: t.kind,
            amount: t.amount,
            balance,
        })
        .collect()
}

/// Register rows with their running balance; `--limit` keeps the most recent rows.
pub fn query_rows<S: KeyValueStore>(
    store: &Storage<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut data = register_rows(store.transactions()?);
    if let Some(&limit) = sub.get_one::<usize>("limit") {
        let skip = data.len().saturating_sub(limit);
        data.drain(..skip);
    }
    Ok(data)
}

fn list<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.date.clone(),
                r.account.clone(),
                r.category.clone(),
                r.payee.clone(),
                r.amount.to_string(),
                fmt_money(&r.balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Account", "Category", "Payee", "Amount", "Balance"],
            rows,
        )
    );
    Ok(())
}

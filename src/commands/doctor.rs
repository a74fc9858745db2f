// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{Expense, Income, SavingGoal, Transaction, UserProfile};
use crate::store::{
    ACCOUNTS_KEY, CATEGORIES_KEY, EXPENSES_KEY, GOALS_KEY, INCOME_KEY, KeyValueStore,
    PROFILE_KEY, Storage, TOTAL_INCOME_KEY, TRANSACTIONS_KEY,
};
use crate::utils::{is_iso_date, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

fn issue(kind: &'static str, detail: String) -> Issue {
    Issue { kind, detail }
}

pub fn handle<S: KeyValueStore>(store: &Storage<S>) -> Result<()> {
    let rows: Vec<Vec<String>> = check(store)?
        .into_iter()
        .map(|i| vec![i.kind.to_string(), i.detail])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

fn corrupt<T: DeserializeOwned, S: KeyValueStore>(store: &Storage<S>, key: &str) -> Result<bool> {
    Ok(match store.kv().get(key)? {
        Some(text) => serde_json::from_str::<T>(&text).is_err(),
        None => false,
    })
}

fn duplicate_ids<'a>(key: &str, ids: impl IntoIterator<Item = &'a str>, out: &mut Vec<Issue>) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            out.push(issue("duplicate_id", format!("{} {}", key, id)));
        }
    }
}

fn bad_dates<'a>(
    key: &str,
    rows: impl IntoIterator<Item = (&'a str, &'a str)>,
    out: &mut Vec<Issue>,
) {
    for (id, date) in rows {
        if !is_iso_date(date) {
            out.push(issue("malformed_date", format!("{} {} '{}'", key, id, date)));
        }
    }
}

/// Every problem the stored data shows; an empty list means healthy.
pub fn check<S: KeyValueStore>(store: &Storage<S>) -> Result<Vec<Issue>> {
    let mut out = Vec::new();

    // 1) Unreadable documents
    let broken = [
        (PROFILE_KEY, corrupt::<UserProfile, S>(store, PROFILE_KEY)?),
        (INCOME_KEY, corrupt::<Vec<Income>, S>(store, INCOME_KEY)?),
        (EXPENSES_KEY, corrupt::<Vec<Expense>, S>(store, EXPENSES_KEY)?),
        (
            TRANSACTIONS_KEY,
            corrupt::<Vec<Transaction>, S>(store, TRANSACTIONS_KEY)?,
        ),
        (GOALS_KEY, corrupt::<Vec<SavingGoal>, S>(store, GOALS_KEY)?),
        (CATEGORIES_KEY, corrupt::<Vec<String>, S>(store, CATEGORIES_KEY)?),
        (ACCOUNTS_KEY, corrupt::<Vec<String>, S>(store, ACCOUNTS_KEY)?),
    ];
    for (key, is_broken) in broken {
        if is_broken {
            out.push(issue("corrupt_json", key.to_string()));
        }
    }

    let incomes = store.income()?;
    let expenses = store.expenses()?;
    let txs = store.transactions()?;
    let goals = store.saving_goals()?;

    // 2) Identity
    duplicate_ids(INCOME_KEY, incomes.iter().map(|i| i.id.as_str()), &mut out);
    duplicate_ids(EXPENSES_KEY, expenses.iter().map(|e| e.id.as_str()), &mut out);
    duplicate_ids(TRANSACTIONS_KEY, txs.iter().map(|t| t.id.as_str()), &mut out);
    duplicate_ids(GOALS_KEY, goals.iter().map(|g| g.id.as_str()), &mut out);

    // 3) Values nothing else validates
    for i in &incomes {
        if i.amount < Decimal::ZERO {
            out.push(issue("negative_amount", format!("{} {}", INCOME_KEY, i.id)));
        }
    }
    for e in &expenses {
        if e.amount < Decimal::ZERO {
            out.push(issue("negative_amount", format!("{} {}", EXPENSES_KEY, e.id)));
        }
    }
    bad_dates(
        INCOME_KEY,
        incomes.iter().map(|i| (i.id.as_str(), i.date.as_str())),
        &mut out,
    );
    bad_dates(
        EXPENSES_KEY,
        expenses.iter().map(|e| (e.id.as_str(), e.date.as_str())),
        &mut out,
    );
    bad_dates(
        TRANSACTIONS_KEY,
        txs.iter().map(|t| (t.id.as_str(), t.date.as_str())),
        &mut out,
    );
    for t in txs.iter().filter(|t| t.amount.is_draft()) {
        out.push(issue("uncommitted_draft", format!("{} '{}'", t.id, t.amount)));
    }

    // 4) Derived scalar out of step with its list
    if let Some(text) = store.kv().get(TOTAL_INCOME_KEY)? {
        let expected = ledger::total(&incomes);
        match Decimal::from_str(text.trim()) {
            Ok(stored) if stored == expected => {}
            _ => out.push(issue(
                "stale_total_income",
                format!("stored '{}', expected {}", text, expected),
            )),
        }
    }

    Ok(out)
}

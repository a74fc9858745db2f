// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{Expense, Income, SavingGoal, Transaction, UserProfile};
use crate::rows::next_id;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const PROFILE_KEY: &str = "budgetBuddyUserProfile";
pub const INCOME_KEY: &str = "budgetBuddyIncome";
pub const EXPENSES_KEY: &str = "budgetBuddyExpenses";
pub const TRANSACTIONS_KEY: &str = "budgetBuddyTransactions";
pub const TOTAL_INCOME_KEY: &str = "budgetBuddyTotalIncome";
pub const GOALS_KEY: &str = "budgetBuddySavingGoals";
pub const CATEGORIES_KEY: &str = "budgetBuddyCategories";
pub const ACCOUNTS_KEY: &str = "budgetBuddyAccounts";

/// Text key-value capability the persistence layer writes through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

/// Give rows stored without an id a fresh one past the largest in use.
fn fill_missing_ids<T>(rows: &mut [T], prefix: &str, id_of: fn(&mut T) -> &mut String) {
    let mut taken: Vec<String> = rows.iter_mut().map(|r| id_of(r).clone()).collect();
    for row in rows.iter_mut() {
        let id = id_of(row);
        if id.is_empty() {
            *id = next_id(prefix, taken.iter().map(String::as_str));
            taken.push(id.clone());
        }
    }
}

/// Typed access to every persisted list. Each setter overwrites its key.
pub struct Storage<S> {
    kv: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(text) = self.kv.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is not valid JSON; using default");
                Ok(None)
            }
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text =
            serde_json::to_string(value).with_context(|| format!("Serialize value for '{}'", key))?;
        tracing::debug!(key, bytes = text.len(), "write");
        self.kv.set(key, &text)
    }

    pub fn profile(&self) -> Result<Option<UserProfile>> {
        self.read(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.write(PROFILE_KEY, profile)
    }

    pub fn clear_profile(&self) -> Result<()> {
        self.kv.remove(PROFILE_KEY)
    }

    pub fn income(&self) -> Result<Vec<Income>> {
        let mut incomes: Vec<Income> = self.read_list(INCOME_KEY)?;
        fill_missing_ids(&mut incomes, "inc", |i| &mut i.id);
        Ok(incomes)
    }

    /// Writes the list and refreshes the derived total-income scalar.
    pub fn set_income(&self, incomes: &[Income]) -> Result<()> {
        self.write(INCOME_KEY, incomes)?;
        self.kv
            .set(TOTAL_INCOME_KEY, &ledger::total(incomes).to_string())
    }

    /// Stored total-income scalar, recomputed from the list when absent or unreadable.
    pub fn total_income(&self) -> Result<Decimal> {
        if let Some(text) = self.kv.get(TOTAL_INCOME_KEY)? {
            match Decimal::from_str(text.trim()) {
                Ok(d) => return Ok(d),
                Err(e) => {
                    tracing::warn!(key = TOTAL_INCOME_KEY, error = %e, "unreadable total; recomputing")
                }
            }
        }
        Ok(ledger::total(&self.income()?))
    }

    pub fn expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self.read_list(EXPENSES_KEY)?;
        fill_missing_ids(&mut expenses, "exp", |e| &mut e.id);
        Ok(expenses)
    }

    pub fn set_expenses(&self, expenses: &[Expense]) -> Result<()> {
        self.write(EXPENSES_KEY, expenses)
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.read_list(TRANSACTIONS_KEY)
    }

    pub fn set_transactions(&self, txs: &[Transaction]) -> Result<()> {
        self.write(TRANSACTIONS_KEY, txs)
    }

    pub fn saving_goals(&self) -> Result<Vec<SavingGoal>> {
        self.read_list(GOALS_KEY)
    }

    pub fn set_saving_goals(&self, goals: &[SavingGoal]) -> Result<()> {
        self.write(GOALS_KEY, goals)
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        self.read_list(CATEGORIES_KEY)
    }

    pub fn set_categories(&self, names: &[String]) -> Result<()> {
        self.write(CATEGORIES_KEY, names)
    }

    pub fn accounts(&self) -> Result<Vec<String>> {
        self.read_list(ACCOUNTS_KEY)
    }

    pub fn set_accounts(&self, names: &[String]) -> Result<()> {
        self.write(ACCOUNTS_KEY, names)
    }
}

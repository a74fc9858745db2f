// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Categorized, CategoryTotal, Expense, Income, Transaction, TxKind, money};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Sum entries into one bucket per distinct category, in first-seen order.
pub fn aggregate_by_category<T: Categorized>(items: &[T]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategoryTotal> = Vec::new();
    for item in items {
        let found = index.get(item.category()).copied();
        match found {
            Some(i) => out[i].amount += item.amount(),
            None => {
                index.insert(item.category(), out.len());
                out.push(CategoryTotal {
                    category: item.category().to_string(),
                    amount: item.amount(),
                });
            }
        }
    }
    out
}

pub fn total<T: Categorized>(items: &[T]) -> Decimal {
    items.iter().map(|i| i.amount()).sum()
}

/// Cumulative signed sum after each transaction, in input order.
pub fn running_balances(txs: &[Transaction]) -> Vec<Decimal> {
    txs.iter()
        .scan(Decimal::ZERO, |acc, tx| {
            *acc += tx.signed_value();
            Some(*acc)
        })
        .collect()
}

/// Spending per category from expense-type transactions only.
pub fn transaction_spend_by_category(txs: &[Transaction]) -> Vec<CategoryTotal> {
    let spent: Vec<&Transaction> = txs.iter().filter(|t| t.kind == TxKind::Expense).collect();
    aggregate_by_category(&spent)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    #[serde(with = "money")]
    pub income: Decimal,
    #[serde(with = "money")]
    pub expenses: Decimal,
    #[serde(with = "money")]
    pub remaining: Decimal,
    #[serde(with = "money::option")]
    pub spent_share: Option<Decimal>,
}

pub fn overview(incomes: &[Income], expenses: &[Expense]) -> Overview {
    let income = total(incomes);
    let spent = total(expenses);
    let spent_share = if income.is_zero() {
        None
    } else {
        Some((spent / income).round_dp(4))
    };
    Overview {
        income,
        expenses: spent,
        remaining: income - spent,
        spent_share,
    }
}

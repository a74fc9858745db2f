// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::db::SqliteStore;
use budgetbuddy::models::{
    Amount, Expense, ExpenseCategory, ExpenseKind, Income, SavingGoal, Transaction, TxKind,
    UserProfile,
};
use budgetbuddy::store::{
    EXPENSES_KEY, INCOME_KEY, KeyValueStore, MemoryStore, PROFILE_KEY, Storage, TOTAL_INCOME_KEY,
    TRANSACTIONS_KEY,
};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample_incomes() -> Vec<Income> {
    vec![
        Income {
            id: "inc-1".into(),
            source: "Salary".into(),
            amount: dec("4200"),
            date: "2025-08-01".into(),
        },
        Income {
            id: "inc-2".into(),
            source: "Freelance".into(),
            amount: dec("600.25"),
            date: "2025-08-15".into(),
        },
    ]
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "tx-1".into(),
            date: "2025-08-03".into(),
            account: "Checking".into(),
            category: "Housing".into(),
            payee: "Landlord".into(),
            amount: Amount::Committed(dec("1500")),
            kind: TxKind::Expense,
        },
        Transaction {
            id: "tx-2".into(),
            date: "2025-08-04".into(),
            account: "Checking".into(),
            category: "Salary".into(),
            payee: "Employer".into(),
            amount: Amount::Committed(dec("-4200.10")),
            kind: TxKind::Income,
        },
        Transaction {
            id: "tx-3".into(),
            date: "2025-08-05".into(),
            account: "Card".into(),
            category: "Food".into(),
            payee: "Deli".into(),
            amount: Amount::Draft("12.".into()),
            kind: TxKind::Expense,
        },
    ]
}

#[test]
fn lists_round_trip_field_for_field() {
    let s = Storage::new(MemoryStore::new());
    let incomes = sample_incomes();
    let txs = sample_transactions();
    let expenses = vec![Expense {
        id: "exp-1".into(),
        category: ExpenseCategory::Utilities,
        amount: dec("220.40"),
        date: "2025-08-05".into(),
        kind: ExpenseKind::Fixed,
    }];
    let goals = vec![SavingGoal {
        id: "goal-1".into(),
        name: "Emergency fund".into(),
        target: dec("5000"),
        saved: dec("1250.5"),
        deadline: Some("2026-01-31".into()),
    }];

    s.set_income(&incomes).unwrap();
    s.set_transactions(&txs).unwrap();
    s.set_expenses(&expenses).unwrap();
    s.set_saving_goals(&goals).unwrap();

    assert_eq!(s.income().unwrap(), incomes);
    assert_eq!(s.transactions().unwrap(), txs);
    assert_eq!(s.expenses().unwrap(), expenses);
    assert_eq!(s.saving_goals().unwrap(), goals);
}

#[test]
fn sqlite_store_round_trips_and_overwrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("buddy.sqlite");
    {
        let s = Storage::new(SqliteStore::open(&path).unwrap());
        s.set_transactions(&sample_transactions()).unwrap();
        s.set_transactions(&sample_transactions()[..1]).unwrap();
    }
    let s = Storage::new(SqliteStore::open(&path).unwrap());
    let txs = s.transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, "tx-1");
}

#[test]
fn sqlite_remove_clears_key() {
    let kv = SqliteStore::open_in_memory().unwrap();
    kv.set(PROFILE_KEY, "{\"username\":\"Ann\"}").unwrap();
    assert!(kv.get(PROFILE_KEY).unwrap().is_some());
    kv.remove(PROFILE_KEY).unwrap();
    assert_eq!(kv.get(PROFILE_KEY).unwrap(), None);
}

#[test]
fn income_write_refreshes_total_scalar() {
    let s = Storage::new(MemoryStore::new());
    s.set_income(&sample_incomes()).unwrap();
    assert_eq!(
        s.kv().get(TOTAL_INCOME_KEY).unwrap().as_deref(),
        Some("4800.25")
    );
    assert_eq!(s.total_income().unwrap(), dec("4800.25"));
}

#[test]
fn unreadable_total_is_recomputed() {
    let s = Storage::new(MemoryStore::new());
    s.set_income(&sample_incomes()).unwrap();
    s.kv().set(TOTAL_INCOME_KEY, "NaN").unwrap();
    assert_eq!(s.total_income().unwrap(), dec("4800.25"));
}

#[test]
fn corrupt_documents_read_as_defaults() {
    let s = Storage::new(SqliteStore::open_in_memory().unwrap());
    s.kv().set(INCOME_KEY, "{oops").unwrap();
    s.kv().set(EXPENSES_KEY, "[{\"category\":\"Rent\"}]").unwrap();
    s.kv().set(TRANSACTIONS_KEY, "42").unwrap();
    s.kv().set(PROFILE_KEY, "[]").unwrap();
    assert!(s.income().unwrap().is_empty());
    assert!(s.expenses().unwrap().is_empty());
    assert!(s.transactions().unwrap().is_empty());
    assert_eq!(s.profile().unwrap(), None);
}

#[test]
fn reads_documents_written_by_the_web_app() {
    let s = Storage::new(MemoryStore::new());
    s.kv()
        .set(
            INCOME_KEY,
            r#"[{"name":"Salary","amount":4200,"date":"2025-08-01"},
                {"name":"Side","amount":600,"date":"2025-08-05"}]"#,
        )
        .unwrap();
    s.kv()
        .set(
            EXPENSES_KEY,
            r#"[{"category":"Housing","amount":1500,"date":"2025-08-03"}]"#,
        )
        .unwrap();
    s.kv()
        .set(PROFILE_KEY, r#"{"username":"Shelly","moneyUsed":310.5}"#)
        .unwrap();
    let incomes = s.income().unwrap();
    assert_eq!(incomes.len(), 2);
    assert_eq!(incomes[0].source, "Salary");
    assert_eq!(incomes[0].id, "inc-1");
    assert_eq!(incomes[1].id, "inc-2");
    let expenses = s.expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, "exp-1");
    assert_eq!(expenses[0].category, ExpenseCategory::Housing);
    assert_eq!(
        s.profile().unwrap(),
        Some(UserProfile {
            username: "Shelly".into(),
            money_used: Some(dec("310.5")),
        })
    );
}

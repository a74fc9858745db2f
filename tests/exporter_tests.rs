// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::models::{Amount, Transaction, TxKind};
use budgetbuddy::store::{MemoryStore, Storage};
use budgetbuddy::{cli, commands::exporter};
use serde_json::json;
use tempfile::tempdir;

fn seeded() -> Storage<MemoryStore> {
    let store = Storage::new(MemoryStore::new());
    store
        .set_transactions(&[
            Transaction {
                id: "tx-1".into(),
                date: "2025-01-02".into(),
                account: "Checking".into(),
                category: "Groceries".into(),
                payee: "Corner Shop".into(),
                amount: Amount::Committed("12.34".parse().unwrap()),
                kind: TxKind::Expense,
            },
            Transaction {
                id: "tx-2".into(),
                date: "2025-01-03".into(),
                account: "Checking".into(),
                category: "Salary".into(),
                payee: "Employer".into(),
                amount: Amount::Committed("-100".parse().unwrap()),
                kind: TxKind::Income,
            },
        ])
        .unwrap();
    store
}

fn export(store: &Storage<MemoryStore>, format: &str, out: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "budgetbuddy",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(store, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_writes_numeric_balance_in_json() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&store, "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": "tx-1",
                "date": "2025-01-02",
                "account": "Checking",
                "category": "Groceries",
                "payee": "Corner Shop",
                "amount": 12.34,
                "type": "expense",
                "balance": 12.34
            },
            {
                "id": "tx-2",
                "date": "2025-01-03",
                "account": "Checking",
                "category": "Salary",
                "payee": "Employer",
                "amount": -100,
                "type": "income",
                "balance": -87.66
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&store, "CSV", &out_str).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][6], "12.34");
    assert_eq!(&records[1][5], "income");
    assert_eq!(&records[1][7], "-87.66");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&store, "xml", &out_str).is_err());
    assert!(!out_path.exists());
}

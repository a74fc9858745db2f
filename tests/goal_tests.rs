// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::commands::{categories, goals, profile};
use budgetbuddy::store::{MemoryStore, Storage};
use budgetbuddy::cli;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn run(store: &Storage<MemoryStore>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["budgetbuddy"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("goal", sub)) => goals::handle(store, sub),
        Some(("profile", sub)) => profile::handle(store, sub),
        Some(("category", sub)) => categories::handle(store, sub),
        Some(("account", sub)) => categories::handle_accounts(store, sub),
        _ => panic!("unexpected subcommand"),
    }
}

#[test]
fn funding_moves_progress_and_never_goes_negative() {
    let store = Storage::new(MemoryStore::new());
    run(&store, &["goal", "add", "--name", "Trip", "--target", "1200", "--deadline", "2026-06-01"]).unwrap();
    run(&store, &["goal", "fund", "--name", "trip", "--amount", "300"]).unwrap();
    let goals = store.saving_goals().unwrap();
    let g = &goals[0];
    assert_eq!(g.id, "goal-1");
    assert_eq!(g.saved, dec("300"));
    assert_eq!(g.progress(), dec("0.25"));

    run(&store, &["goal", "fund", "--name", "Trip", "--amount", "-500"]).unwrap();
    assert_eq!(store.saving_goals().unwrap()[0].saved, Decimal::ZERO);
}

#[test]
fn duplicate_and_unknown_goals_fail() {
    let store = Storage::new(MemoryStore::new());
    run(&store, &["goal", "add", "--name", "Car", "--target", "8000"]).unwrap();
    assert!(run(&store, &["goal", "add", "--name", "car", "--target", "1"]).is_err());
    assert!(run(&store, &["goal", "fund", "--name", "Boat", "--amount", "1"]).is_err());
    assert!(run(&store, &["goal", "rm", "--name", "Boat"]).is_err());
    run(&store, &["goal", "rm", "--name", "Car"]).unwrap();
    assert!(store.saving_goals().unwrap().is_empty());
}

#[test]
fn profile_defaults_then_persists() {
    let store = Storage::new(MemoryStore::new());
    assert_eq!(profile::current(&store).unwrap().username, profile::DEFAULT_USERNAME);

    run(&store, &["profile", "set", "--name", "  Ann  ", "--money-used", "310.50"]).unwrap();
    let p = store.profile().unwrap().unwrap();
    assert_eq!(p.username, "Ann");
    assert_eq!(p.money_used, Some(dec("310.50")));

    // renaming keeps the recorded spend
    run(&store, &["profile", "set", "--name", "Annie"]).unwrap();
    assert_eq!(store.profile().unwrap().unwrap().money_used, Some(dec("310.50")));

    assert!(run(&store, &["profile", "set", "--name", "   "]).is_err());
    run(&store, &["profile", "clear"]).unwrap();
    assert_eq!(store.profile().unwrap(), None);
}

#[test]
fn custom_categories_extend_builtins_once() {
    let store = Storage::new(MemoryStore::new());
    run(&store, &["category", "add", "--name", "Pets"]).unwrap();
    run(&store, &["category", "add", "--name", "pets"]).unwrap();
    run(&store, &["category", "add", "--name", "food"]).unwrap();
    assert_eq!(store.categories().unwrap(), vec!["Pets"]);
    let all = categories::all_categories(&store).unwrap();
    assert_eq!(all.len(), 8);
    assert_eq!(all.last().map(String::as_str), Some("Pets"));

    run(&store, &["account", "add", "--name", "Savings"]).unwrap();
    run(&store, &["account", "add", "--name", "Savings"]).unwrap();
    assert_eq!(store.accounts().unwrap(), vec!["Savings"]);
}

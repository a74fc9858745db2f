// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Form-row editing over the persisted lists.
//!
//! Every list keeps at least one row, new rows are inserted right after the
//! row that asked for them, and transaction amounts move from a typed draft to
//! a committed number when editing finishes.

use crate::error::BuddyError;
use crate::models::{Amount, Transaction, TxKind};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static DRAFT_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d*\.?\d{0,2}$").expect("draft amount pattern"));

/// Insert `row` right after `index`, or at the end when `index` is past it.
/// Returns the position of the new row.
pub fn insert_after<T>(rows: &mut Vec<T>, index: usize, row: T) -> usize {
    let at = if rows.is_empty() {
        0
    } else {
        index.saturating_add(1).min(rows.len())
    };
    rows.insert(at, row);
    at
}

/// Remove the row at `index`. The last remaining row is never removed.
pub fn remove_at<T>(rows: &mut Vec<T>, index: usize) -> Result<Option<T>, BuddyError> {
    if index >= rows.len() {
        return Err(BuddyError::RowOutOfRange {
            index,
            len: rows.len(),
        });
    }
    if rows.len() == 1 {
        return Ok(None);
    }
    Ok(Some(rows.remove(index)))
}

pub fn row_mut<T>(rows: &mut [T], index: usize) -> Result<&mut T, BuddyError> {
    let len = rows.len();
    rows.get_mut(index)
        .ok_or(BuddyError::RowOutOfRange { index, len })
}

/// Whether `text` is an acceptable in-progress amount.
pub fn accepts_draft(text: &str) -> bool {
    text.is_empty() || DRAFT_AMOUNT.is_match(text)
}

/// Replace the amount with a draft, leaving the row untouched on rejection.
pub fn edit_amount(tx: &mut Transaction, text: &str) -> Result<(), BuddyError> {
    if !accepts_draft(text) {
        return Err(BuddyError::InvalidAmount(text.to_string()));
    }
    tx.amount = Amount::Draft(text.to_string());
    Ok(())
}

/// Normalize typed text to a committed value rounded to cents.
pub fn commit_text(text: &str) -> Decimal {
    let t = text.trim();
    if t.is_empty() || t == "0" {
        return Decimal::ZERO;
    }
    let t = t.trim_end_matches('.');
    let normalized = if t.starts_with('.') {
        format!("0{}", t)
    } else {
        t.to_string()
    };
    Decimal::from_str(&normalized)
        .map(|d| d.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

/// Commit a draft amount. Returns whether the row held a draft.
pub fn commit(tx: &mut Transaction) -> bool {
    let Amount::Draft(text) = &tx.amount else {
        return false;
    };
    tx.amount = Amount::Committed(commit_text(text));
    true
}

/// Typed amounts are magnitudes; deposits (income rows) are stored negative.
pub fn apply_direction(tx: &mut Transaction) {
    if let Amount::Committed(d) = tx.amount {
        tx.amount = Amount::Committed(match tx.kind {
            TxKind::Income => -d.abs(),
            TxKind::Expense => d.abs(),
        });
    }
}

/// Field names still blocking the row from being added.
pub fn missing_fields(tx: &Transaction) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if tx.date.is_empty() {
        missing.push("date");
    }
    if tx.account.is_empty() {
        missing.push("account");
    }
    if tx.category.is_empty() {
        missing.push("category");
    }
    if tx.payee.trim().is_empty() {
        missing.push("payee");
    }
    if tx.amount.value() <= Decimal::ZERO {
        missing.push("amount");
    }
    missing
}

pub fn is_complete(tx: &Transaction) -> bool {
    missing_fields(tx).is_empty()
}

pub fn ensure_complete(tx: &Transaction) -> Result<(), BuddyError> {
    let missing = missing_fields(tx);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BuddyError::IncompleteRow(format!(
            "fill {}",
            missing.join(", ")
        )))
    }
}

/// Partial update of a transaction row. `None` leaves a field as is.
#[derive(Debug, Default, Clone)]
pub struct TxPatch {
    pub date: Option<String>,
    pub account: Option<String>,
    pub category: Option<String>,
    pub payee: Option<String>,
    pub amount: Option<String>,
    /// Keep the amount as a draft instead of committing it.
    pub draft: bool,
}

pub fn apply_patch(tx: &mut Transaction, patch: &TxPatch) -> Result<(), BuddyError> {
    if let Some(text) = &patch.amount {
        edit_amount(tx, text)?;
    }
    // an empty date clears nothing
    if let Some(d) = patch.date.as_deref().filter(|d| !d.is_empty()) {
        tx.date = d.to_string();
    }
    if let Some(a) = &patch.account {
        tx.account = a.clone();
    }
    if let Some(c) = &patch.category {
        tx.category = c.clone();
    }
    if let Some(p) = &patch.payee {
        tx.payee = p.clone();
    }
    // a draft committed by any later edit still takes the row's direction
    if !patch.draft && commit(tx) {
        apply_direction(tx);
    }
    Ok(())
}

pub fn find_tx_mut<'a>(
    txs: &'a mut [Transaction],
    id: &str,
) -> Result<&'a mut Transaction, BuddyError> {
    txs.iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| BuddyError::UnknownTransaction(id.to_string()))
}

/// Distinct non-blank payees in first-seen order.
pub fn payee_suggestions(txs: &[Transaction]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in txs {
        let p = t.payee.trim();
        if !p.is_empty() && !out.iter().any(|seen| seen == p) {
            out.push(p.to_string());
        }
    }
    out
}

/// Next `<prefix>-<n>` id, one past the largest numeric suffix in use.
pub fn next_id<'a>(prefix: &str, ids: impl IntoIterator<Item = &'a str>) -> String {
    let lead = format!("{}-", prefix);
    let max = ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(lead.as_str()))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{}", lead, max + 1)
}

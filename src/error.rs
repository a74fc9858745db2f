// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuddyError {
    #[error("Row {index} out of range (list has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Transaction '{0}' not found")]
    UnknownTransaction(String),

    #[error("Saving goal '{0}' not found")]
    UnknownGoal(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Invalid amount '{0}', expected up to two decimal places")]
    InvalidAmount(String),

    #[error("Row is incomplete: {0}")]
    IncompleteRow(String),

    #[error("Unknown format: {0} (use csv|json)")]
    UnknownFormat(String),
}

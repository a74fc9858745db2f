// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::UserProfile;
use crate::store::{KeyValueStore, Storage};
use crate::utils::{fmt_money, parse_decimal};
use anyhow::{Result, bail};

/// Shown when no profile has been saved yet.
pub const DEFAULT_USERNAME: &str = "Shelly";

pub fn handle<S: KeyValueStore>(store: &Storage<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let p = current(store)?;
            println!("Welcome {}", p.username);
            if let Some(used) = p.money_used {
                println!("Money used: {}", fmt_money(&used));
            }
        }
        Some(("set", sub)) => {
            let p = set(store, sub)?;
            println!("Saved profile for '{}'", p.username);
        }
        Some(("clear", _)) => {
            store.clear_profile()?;
            println!("Profile cleared");
        }
        _ => {}
    }
    Ok(())
}

/// Stored profile, or the default name when none exists.
pub fn current<S: KeyValueStore>(store: &Storage<S>) -> Result<UserProfile> {
    Ok(store.profile()?.unwrap_or_else(|| UserProfile {
        username: DEFAULT_USERNAME.to_string(),
        money_used: None,
    }))
}

pub fn set<S: KeyValueStore>(store: &Storage<S>, sub: &clap::ArgMatches) -> Result<UserProfile> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        bail!("Name must not be blank");
    }
    let money_used = match sub.get_one::<String>("money-used") {
        Some(s) => Some(parse_decimal(s)?),
        None => store.profile()?.and_then(|p| p.money_used),
    };
    let profile = UserProfile {
        username: name,
        money_used,
    };
    store.save_profile(&profile)?;
    tracing::info!(username = %profile.username, "profile saved");
    Ok(profile)
}

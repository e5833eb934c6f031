use std::io::{BufRead, Write};
use std::path::Path;

use crate::constants::MSG_INVALID_CHOICE;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::persistence;
use crate::store::UserStore;
use crate::validation::Rules;
use crate::workflow::Console;

/// What a load did to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file at the path; store untouched
    NotFound,
    /// Store was empty and now holds exactly the loaded users
    Replaced { count: usize },
    /// Store already had users, so the merge workflow ran
    Merged(MergeOutcome),
}

/// Result of reconciling loaded users with the current store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Current users were discarded in favour of the loaded set
    Overwritten { count: usize },
    /// Loaded users were folded into the current store one by one
    Merged {
        added: usize,
        overwritten: usize,
        kept: usize,
    },
    /// Unrecognised choice; store untouched
    Cancelled,
}

/// Load users from file
///
/// A missing file is reported and leaves the store as it is. Records that
/// break the active `rules` are still loaded but logged. If the store is
/// empty it simply takes the loaded users, otherwise the user picks between
/// overwrite and merge.
pub fn load_users<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut UserStore,
    path: &Path,
    rules: &Rules,
) -> Result<LoadOutcome> {
    let loaded = match persistence::load(path) {
        Ok(users) => users,
        Err(AppError::FileNotFound(_)) => {
            tracing::info!("No user file at {:?}", path);
            console.println("File not found")?;
            return Ok(LoadOutcome::NotFound);
        }
        Err(e) => return Err(e),
    };

    for user in &loaded {
        if let Err(errors) = rules.validate_user(user) {
            let fields: Vec<String> = errors.iter().map(|e| e.field.to_string()).collect();
            tracing::warn!(
                "Loaded user {} violates rules for: {}",
                user.id,
                fields.join(", ")
            );
        }
    }

    if store.is_empty() {
        let count = loaded.len();
        store.replace_all(loaded);
        console.println("Users loaded from file")?;
        return Ok(LoadOutcome::Replaced { count });
    }

    merge_users(console, store, loaded).map(LoadOutcome::Merged)
}

/// Reconcile `loaded` with the users already in `store`
///
/// Lists both sets, then asks whether to overwrite the store with the loaded
/// users or merge them in. When merging, new Ids are added straight away and
/// each colliding Id is overwritten only if the answer is `y` (any case).
/// If input ends before every collision is answered, the store is unchanged.
pub fn merge_users<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut UserStore,
    loaded: Vec<User>,
) -> Result<MergeOutcome> {
    console.println("Loaded users:")?;
    for user in &loaded {
        console.println(format!("Id: {}, Login: {}", user.id, user.login))?;
    }

    console.println("Current users:")?;
    let current: Vec<String> = store
        .iter()
        .map(|user| format!("Id: {}, Login: {}", user.id, user.login))
        .collect();
    for line in current {
        console.println(line)?;
    }

    console.println("Choose action:")?;
    console.println("1. Overwrite current users with loaded users")?;
    console.println("2. Merge loaded users with current users")?;

    let choice = console.read_line()?;
    let outcome = match choice.trim().parse::<i64>() {
        Ok(1) => {
            let count = loaded.len();
            store.replace_all(loaded);
            console.println("Users loaded from file")?;
            MergeOutcome::Overwritten { count }
        }
        Ok(2) => {
            // The store only changes once every collision has an answer
            let mut staged = store.clone();
            let (mut added, mut overwritten, mut kept) = (0, 0, 0);
            for user in loaded {
                if !staged.contains(user.id) {
                    staged.insert(user)?;
                    added += 1;
                    continue;
                }

                console.println(format!(
                    "User with Id {} already exists. Do you want to overwrite? (y/n)",
                    user.id
                ))?;
                let answer = console.read_line()?;
                if answer.trim().eq_ignore_ascii_case("y") {
                    staged.upsert(user);
                    overwritten += 1;
                } else {
                    kept += 1;
                }
            }
            *store = staged;
            console.println(format!(
                "Users merged: {added} added, {overwritten} overwritten, {kept} kept"
            ))?;
            MergeOutcome::Merged {
                added,
                overwritten,
                kept,
            }
        }
        _ => {
            console.println(MSG_INVALID_CHOICE)?;
            MergeOutcome::Cancelled
        }
    };

    tracing::info!("Merge finished: {:?}", outcome);
    Ok(outcome)
}

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::constants::MSG_INVALID_CHOICE;
use crate::error::{AppError, Result};
use crate::store::UserStore;
use crate::workflow::{load_users, register_user, save_users, Console};

const MENU: [&str; 5] = [
    "Menu:",
    "1. Register new user",
    "2. Load users from file",
    "3. Save users to file",
    "4. Exit",
];

/// A main menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    Load,
    Save,
    Exit,
}

impl MenuChoice {
    /// Map a typed line to an entry; anything unrecognised is `None`
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<i64>().ok()? {
            1 => Some(MenuChoice::Register),
            2 => Some(MenuChoice::Load),
            3 => Some(MenuChoice::Save),
            4 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Run the menu loop until the user exits or input ends
///
/// Failed loads and saves are reported and the menu comes back. Only a
/// broken console ends the session with an error.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut UserStore,
    config: &Config,
) -> Result<()> {
    let rules = config.rules();

    loop {
        for line in MENU {
            console.println(line)?;
        }

        let line = match console.read_line() {
            Ok(line) => line,
            Err(AppError::InputClosed) => {
                tracing::info!("Input closed, exiting");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let result = match MenuChoice::parse(&line) {
            Some(MenuChoice::Register) => {
                register_user(console, store, &rules, config.duplicate_policy).map(|_| ())
            }
            Some(MenuChoice::Load) => {
                load_users(console, store, &config.registry_file, &rules).map(|_| ())
            }
            Some(MenuChoice::Save) => {
                save_users(console, store, &config.registry_file).map(|_| ())
            }
            Some(MenuChoice::Exit) => {
                tracing::info!("Exiting with {} users in memory", store.len());
                return Ok(());
            }
            None => {
                tracing::debug!("Unrecognised menu input: {:?}", line);
                console.println(MSG_INVALID_CHOICE)
            }
        };

        match result {
            Ok(()) => {}
            Err(AppError::InputClosed) => {
                tracing::info!("Input closed, exiting");
                return Ok(());
            }
            Err(e) => {
                if e.is_recoverable() {
                    tracing::warn!("Operation failed: {}", e);
                } else {
                    tracing::error!("Operation failed: {}", e);
                }
                console.println(format!("Error: {e}"))?;
            }
        }
    }
}

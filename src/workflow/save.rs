use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::Result;
use crate::persistence;
use crate::store::UserStore;
use crate::workflow::Console;

/// Save users to file
///
/// Writes the whole store to `path`, replacing whatever was there. An empty
/// store still produces a valid, empty document.
pub fn save_users<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &UserStore,
    path: &Path,
) -> Result<usize> {
    let count = persistence::save(store, path)?;
    console.println("Users saved to file")?;
    Ok(count)
}

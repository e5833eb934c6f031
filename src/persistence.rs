//! Reading and writing the registry file
//!
//! The file is a JSON document wrapping the flat [`UserRecord`] list:
//!
//! ```json
//! { "version": 1, "savedAt": "...", "digest": "<sha256>", "users": [ ... ] }
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DOCUMENT_VERSION;
use crate::error::{AppError, Result};
use crate::models::{User, UserRecord};
use crate::security::{records_digest, verify_digest};
use crate::store::UserStore;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// Absent in hand-written files, in which case it is not checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub users: Vec<UserRecord>,
}

/// Write every stored user to `path`, replacing any existing file
///
/// Returns the number of records written.
pub fn save(store: &UserStore, path: &Path) -> Result<usize> {
    let users: Vec<UserRecord> = store.iter().map(UserRecord::from).collect();
    let document = UserDocument {
        version: DOCUMENT_VERSION,
        saved_at: Utc::now(),
        digest: Some(records_digest(&users)?),
        users,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(&document)?;
    fs::write(path, json)?;

    tracing::info!("Saved {} users to {:?}", document.users.len(), path);
    Ok(document.users.len())
}

/// Read the users stored at `path`
///
/// A missing file is [`AppError::FileNotFound`]. Anything that does not parse,
/// fails the digest, or repeats an Id is [`AppError::CorruptDocument`].
pub fn load(path: &Path) -> Result<Vec<User>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let document = parse_document(&contents)?;
    tracing::info!(
        "Loaded {} users from {:?} (saved at {})",
        document.users.len(),
        path,
        document.saved_at.to_rfc3339()
    );

    Ok(document.users.into_iter().map(User::from).collect())
}

/// Parse and check a registry document
pub fn parse_document(contents: &str) -> Result<UserDocument> {
    let document: UserDocument = serde_json::from_str(contents).map_err(|e| {
        tracing::warn!("Unreadable user document: {}", e);
        AppError::CorruptDocument(e.to_string())
    })?;

    if document.version != DOCUMENT_VERSION {
        return Err(AppError::CorruptDocument(format!(
            "unsupported document version {}",
            document.version
        )));
    }

    if let Some(digest) = &document.digest {
        if !verify_digest(&document.users, digest) {
            tracing::warn!("User document digest mismatch");
            return Err(AppError::CorruptDocument(
                "digest does not match user list".to_string(),
            ));
        }
    }

    let mut seen = HashSet::new();
    for record in &document.users {
        if !seen.insert(record.id) {
            return Err(AppError::CorruptDocument(format!(
                "Id {} appears more than once",
                record.id
            )));
        }
    }

    Ok(document)
}

use sha2::{Digest, Sha256};

use crate::models::UserRecord;

// =============================================================================
// Document Integrity
// =============================================================================

/// Compute the integrity digest of a user list
///
/// The digest is written next to the records in every saved document so a
/// truncated or hand-edited file is detected on load instead of silently
/// producing a partial registry.
///
/// # Arguments
/// * `records` - The records exactly as they are serialized into the document
///
/// # Returns
/// * Hex-encoded SHA-256 of the compact JSON encoding of `records`
///
/// # Security Note
/// This is a checksum, not a signature. Anyone able to edit the file can
/// recompute it. The records themselves, passwords and card numbers
/// included, are stored in plain text.
pub fn records_digest(records: &[UserRecord]) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(records)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Check a stored digest against the records it claims to cover
///
/// Comparison is case-insensitive on the hex string.
pub fn verify_digest(records: &[UserRecord], expected: &str) -> bool {
    match records_digest(records) {
        Ok(actual) => actual.eq_ignore_ascii_case(expected.trim()),
        Err(e) => {
            tracing::error!("Failed to encode records for digest: {}", e);
            false
        }
    }
}

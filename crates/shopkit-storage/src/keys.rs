//! Storage key derivation.
//!
//! Key format: `{unix_millis}-{random_token}.{extension}`, where the extension
//! is everything after the last `.` of the original filename. Filenames without
//! an extension produce a key with no trailing dot.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of the random alphanumeric token. 12 characters over [0-9a-zA-Z]
/// gives ~71 bits of entropy per key, on top of the millisecond timestamp.
const TOKEN_LEN: usize = 12;

/// Derive a collision-resistant storage key from the original filename.
///
/// The token is generated fresh on every call, so two keys derived within the
/// same millisecond still differ. Always succeeds; a filename without a `.`
/// simply yields an extension-less key.
pub fn derive_object_key(original_filename: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect();

    match original_filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{}-{}.{}", millis, token, ext),
        _ => format!("{}-{}", millis, token),
    }
}

//! S3 object key generation for uploads

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const UPLOAD_PREFIX: &str = "uploads/";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Returns `uploads/upload-YYYY-MM-DD-HH-MM-SS.jpg` for the given instant.
///
/// Two uploads inside the same second map to the same key.
#[must_use]
pub fn upload_key(at: DateTime<Utc>) -> String {
    format!("{UPLOAD_PREFIX}upload-{}.jpg", at.format(TIMESTAMP_FORMAT))
}

/// Same as [`upload_key`] with an 8 hex char random suffix before the extension.
#[must_use]
pub fn unique_upload_key(at: DateTime<Utc>) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!(
        "{UPLOAD_PREFIX}upload-{}-{}.jpg",
        at.format(TIMESTAMP_FORMAT),
        &simple[..8]
    )
}

/// Picks the key style configured for this deployment.
#[must_use]
pub fn key_for(at: DateTime<Utc>, unique: bool) -> String {
    if unique {
        unique_upload_key(at)
    } else {
        upload_key(at)
    }
}

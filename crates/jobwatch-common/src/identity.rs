//! Job identity and content digests
//!
//! Two independent hashes are derived from every incoming posting:
//!
//! - the **job id**, from `(title, url)` only, which names the posting across
//!   batches no matter how its text evolves;
//! - the **content digest**, from `(title, location, description)` only, which
//!   is compared between sightings to detect edits.
//!
//! Both functions are pure. Company names never participate, so two companies
//! publishing the same title at the same URL share one identity.

use crate::types::JobPosting;
use sha2::{Digest, Sha256};

/// Separator between digest fields; cannot appear in normalized text boundaries
/// by accident the way `:` can.
const FIELD_SEPARATOR: char = '\u{1f}';

/// Trim and collapse every run of whitespace to a single space
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an identity component: case-folded, whitespace-collapsed
fn normalize_identity_part(value: &str) -> String {
    collapse_whitespace(&value.to_lowercase())
}

/// Derive the stable job identifier from a title and URL.
///
/// Matching is case-insensitive and ignores leading, trailing and repeated
/// whitespace, so `("Engineer ", "URL/1")` and `("engineer", "url/1")` name the
/// same job. The result is 32 lowercase hex characters (MD5).
pub fn derive_id(job_title: &str, url: &str) -> String {
    let content = format!(
        "{}:{}",
        normalize_identity_part(job_title),
        normalize_identity_part(url)
    );
    format!("{:x}", md5::compute(content.as_bytes()))
}

/// Derive the content digest of a posting (64 lowercase hex characters, SHA-256).
///
/// Covers title, location and description. Whitespace is normalized per field
/// but case is kept, so re-capitalising a description counts as an edit.
pub fn derive_digest(job: &JobPosting) -> String {
    digest_fields(&job.title, &job.location, &job.description)
}

/// Digest over raw field values, for callers holding a stored record rather
/// than a posting.
pub fn digest_fields(job_title: &str, location: &str, description: &str) -> String {
    let content = [job_title, location, description]
        .iter()
        .map(|field| collapse_whitespace(field))
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string());

    hex::encode(Sha256::digest(content.as_bytes()))
}

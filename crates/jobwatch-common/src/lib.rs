//! Jobwatch Common Library
//!
//! Shared types, identity hashing, and error handling for the Jobwatch project.
//!
//! # Overview
//!
//! This crate has no storage dependencies and is used by every workspace member:
//!
//! - **Identity**: stable job identifiers and content digests (`identity`)
//! - **Types**: job postings, stored records, transition entries, summaries
//! - **Error Handling**: validation errors and the crate result type
//! - **Logging**: tracing subscriber setup shared by binaries
//!
//! # Example
//!
//! ```
//! use jobwatch_common::identity::{derive_digest, derive_id};
//! use jobwatch_common::types::JobPosting;
//!
//! let posting = JobPosting::new("Data Analyst", "https://x/1");
//! let id = derive_id(&posting.title, &posting.url);
//! assert_eq!(id, derive_id("data analyst ", "HTTPS://X/1"));
//! assert_eq!(derive_digest(&posting).len(), 64);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod identity;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{JobwatchError, Result};
pub use types::{JobPosting, JobRecord, JobStatus, RawJob, TransitionEntry};

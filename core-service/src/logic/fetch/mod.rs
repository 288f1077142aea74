//! Fetch Module - Remote changeset retrieval

pub mod client;
pub mod types;

pub use client::{download_changeset, ChangesetClient};
pub use types::{Changeset, FetchOutcome};

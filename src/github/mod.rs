//! GitHub-backed storage for the waitlist
//!
//! The waitlist lives as a single JSON file in a GitHub repository, read and
//! written through the contents API. There is no other persistence.

mod service;

pub use service::{GithubService, SUBMITTED_AT_FORMAT};

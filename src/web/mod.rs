//! Web server for the landing page and waitlist signup
//!
//! Serves the static pages and the one JSON submission endpoint; persistence
//! is delegated to the GitHub storage client.

mod server;

pub use server::{start_web_server, AppState};

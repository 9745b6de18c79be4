//! A small HTTP service exposing CRUD operations over subscriber records.

pub mod app;
pub mod config;
pub mod database;
mod error;
pub mod model;
pub mod templ_manager;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Tracing setup used by debug builds and tests.
/// Honors `RUST_LOG`, falls back to `debug`.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .compact()
        .init();
}

/// Tracing setup used by release builds.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

//! Court Case Management Dashboard client core.
//!
//! A typed client for the court case management REST backend: session handling,
//! an HTTP adapter with uniform error side effects, a keyed query cache and one
//! view model per dashboard page.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod notify;
pub mod query;
pub mod routes;
pub mod session;
pub mod views;

pub use app::{Dashboard, PageInput, Screen};
pub use config::Config;
pub use errors::ClientError;

#[cfg(test)]
mod tests;

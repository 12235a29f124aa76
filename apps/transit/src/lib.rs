//! # transit
//!
//! The query tool around `transit-core`.
//!
//! ```text
//! JSON document ──▶ document::RequestDocument
//!                        │
//!                        ▼
//!               handler::RequestHandler ──▶ transit-core (Catalogue, stats, RoutingGraph)
//!                        │
//!                        ▼
//!               Vec<document::StatResponse> ──▶ JSON array
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod handler;

pub use config::AppConfig;
pub use error::CliError;

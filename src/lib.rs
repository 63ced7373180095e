// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # tap-cin7
//!
//! Extracts records from the CIN7 REST API and writes them as JSON-lines
//! messages for downstream loaders.
//!
//! ## Features
//!
//! - **Seven streams**: products, purchase orders, sales orders, stock,
//!   vouchers, supplier contacts and branches
//! - **Page-number pagination**: pages are requested until one comes back empty
//! - **Incremental sync**: `modifiedDate` filters driven by a persisted cursor
//! - **Retry with backoff**: 5xx and transport failures are retried, 4xx are not
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_cin7::{config::TapConfig, engine::SyncEngine, http::HttpClient};
//! use tap_cin7::{state::StateManager, streams::all_streams};
//!
//! #[tokio::main]
//! async fn main() -> tap_cin7::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let client = HttpClient::with_config(config.http_config())?
//!         .with_credentials(config.credentials());
//!
//!     let mut engine = SyncEngine::new(client, StateManager::in_memory());
//!     let streams: Vec<_> = all_streams().iter().collect();
//!     let mut out = Vec::new();
//!     let summary = engine.run(&streams, &mut out).await?;
//!     println!("{} records", summary.total_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    CLI: spec / check / discover / read       │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬─────────────┬──────────┐
//! │ Streams  │   HTTP    │  Pagination   │ Incremental │  Output  │
//! ├──────────┼───────────┼───────────────┼─────────────┼──────────┤
//! │ Paths    │ Basic auth│ Page cursor   │ Start date  │ SCHEMA   │
//! │ Schemas  │ Retry     │ Empty page    │ Watermark   │ RECORD   │
//! │ Keys     │ Throttle  │  terminates   │ where filter│ STATE    │
//! └──────────┴───────────┴───────────────┴─────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Basic authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page cursor controller
pub mod pagination;

/// Incremental window and request parameters
pub mod incremental;

/// State management and checkpointing
pub mod state;

/// JSON-Schema types
pub mod schema;

/// Stream definitions and catalog
pub mod streams;

/// Protocol messages and sinks
pub mod output;

/// Main execution engine
pub mod engine;

/// Tap configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::TapConfig;
pub use streams::{all_streams, catalog, StreamDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! State management module
//!
//! Tracks the replication high-water mark of each stream between runs.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - per-stream cursors, serialized as JSON
//! - `StateManager` - file-backed persistence with atomic writes
//!
//! Cursors are stored as `YYYY-MM-DDTHH:MM:SSZ` strings and only ever move
//! forward.

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{State, StreamState};

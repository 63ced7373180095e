//! Stream catalog
//!
//! The seven CIN7 resources this tap extracts, in the order they are synced.

mod definition;
mod schemas;

pub use definition::{
    all_streams, catalog, find_stream, select_streams, Catalog, CatalogEntry, StreamDefinition,
};

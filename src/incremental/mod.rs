//! Incremental sync module
//!
//! Computes the lower bound of a sync and turns it into request parameters.
//!
//! # Overview
//!
//! - [`resolve_start`] - picks the effective start from config and state
//! - [`build_params`] - builds `page`/`sort`/`order_by`/`where` for one request
//! - [`format_timestamp`] / [`parse_timestamp`] - the API's timestamp forms

mod params;
mod window;

pub use params::{build_params, filter_predicate, merge_static_params, RequestParams};
pub use window::{format_timestamp, parse_timestamp, resolve_start, TIMESTAMP_FORMAT};

#[cfg(test)]
mod tests;

//! Request parameter builder

use super::window::format_timestamp;
use crate::pagination::PageToken;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Query parameters for one request, ordered so equal inputs give equal URLs
pub type RequestParams = BTreeMap<String, String>;

/// Query-language predicate selecting records changed after `start`.
///
/// Produces `field>'YYYY-MM-DDTHH:MM:SSZ'`, the API's own `where` grammar.
pub fn filter_predicate(field: &str, start: &DateTime<Utc>) -> String {
    format!("{field}>'{}'", format_timestamp(start))
}

/// Build the query parameters for a page request.
///
/// `page` is always present. A replication field adds ascending ordering on
/// that field, and together with a start timestamp a `where` filter.
pub fn build_params(
    page_token: Option<PageToken>,
    replication_field: Option<&str>,
    start: Option<DateTime<Utc>>,
) -> RequestParams {
    let mut params = RequestParams::new();
    let page = page_token.unwrap_or(PageToken::FIRST);
    params.insert("page".to_string(), page.to_string());

    if let Some(field) = replication_field {
        params.insert("sort".to_string(), "asc".to_string());
        params.insert("order_by".to_string(), field.to_string());

        if let Some(start) = start {
            params.insert("where".to_string(), filter_predicate(field, &start));
        }
    }

    params
}

/// Merge a stream's fixed parameters into built parameters.
///
/// Two `where` predicates are combined with `AND`; for any other key the
/// built value is kept.
pub fn merge_static_params(params: &mut RequestParams, static_params: &[(&str, &str)]) {
    for (key, value) in static_params {
        match params.get_mut(*key) {
            Some(existing) if *key == "where" => {
                *existing = format!("{value} AND {existing}");
            }
            Some(_) => {}
            None => {
                params.insert((*key).to_string(), (*value).to_string());
            }
        }
    }
}

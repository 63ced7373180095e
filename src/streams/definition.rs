//! Stream definitions

use super::schemas;
use crate::error::{Error, Result};
use crate::incremental::{build_params, merge_static_params, parse_timestamp, RequestParams};
use crate::pagination::PageToken;
use crate::schema::JsonSchema;
use crate::types::{JsonValue, SyncMode};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Static description of one API resource
#[derive(Debug, Clone)]
pub struct StreamDefinition {
    /// Stream name used in output and state
    pub name: &'static str,
    /// Path below the base URL
    pub path: &'static str,
    /// Value of the `rows` parameter, if the endpoint takes one
    pub page_size: Option<u32>,
    /// Fields identifying a record
    pub primary_keys: &'static [&'static str],
    /// Timestamp field used for incremental sync
    pub replication_key: Option<&'static str>,
    /// Parameters sent with every request
    pub static_params: &'static [(&'static str, &'static str)],
    schema: fn() -> JsonSchema,
}

impl StreamDefinition {
    /// Record schema
    pub fn schema(&self) -> JsonSchema {
        (self.schema)()
    }

    /// Sync mode implied by the replication key
    pub fn sync_mode(&self) -> SyncMode {
        if self.replication_key.is_some() {
            SyncMode::Incremental
        } else {
            SyncMode::FullRefresh
        }
    }

    /// Query parameters for the page `token` (`None` = first page).
    ///
    /// `start` only applies to streams with a replication key.
    pub fn request_params(
        &self,
        token: Option<PageToken>,
        start: Option<DateTime<Utc>>,
    ) -> RequestParams {
        let mut params = build_params(token, self.replication_key, start);
        merge_static_params(&mut params, self.static_params);
        if let Some(rows) = self.page_size {
            params.insert("rows".to_string(), rows.to_string());
        }
        params
    }

    /// Replication timestamp of a record, if it has a readable one
    pub fn replication_value(&self, record: &JsonValue) -> Option<DateTime<Utc>> {
        let field = self.replication_key?;
        let raw = record.get(field)?.as_str()?;
        parse_timestamp(raw).ok()
    }

    /// Catalog entry for discovery output
    pub fn catalog_entry(&self) -> CatalogEntry {
        let supported_sync_modes = match self.sync_mode() {
            SyncMode::Incremental => vec![SyncMode::FullRefresh, SyncMode::Incremental],
            SyncMode::FullRefresh => vec![SyncMode::FullRefresh],
        };

        CatalogEntry {
            name: self.name.to_string(),
            json_schema: self.schema(),
            supported_sync_modes,
            source_defined_cursor: self.replication_key.is_some(),
            default_cursor_field: self.replication_key.map(|k| vec![k.to_string()]),
            source_defined_primary_key: self
                .primary_keys
                .iter()
                .map(|k| vec![(*k).to_string()])
                .collect(),
        }
    }
}

/// One stream in the discovery catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub json_schema: JsonSchema,
    pub supported_sync_modes: Vec<SyncMode>,
    pub source_defined_cursor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cursor_field: Option<Vec<String>>,
    pub source_defined_primary_key: Vec<Vec<String>>,
}

/// Discovery catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub streams: Vec<CatalogEntry>,
}

// ============================================================================
// Stream Table
// ============================================================================

const ROWS: Option<u32> = Some(250);
const MODIFIED_DATE: Option<&str> = Some("modifiedDate");

static STREAMS: [StreamDefinition; 7] = [
    StreamDefinition {
        name: "products",
        path: "/v1/Products",
        page_size: ROWS,
        primary_keys: &["id"],
        replication_key: MODIFIED_DATE,
        static_params: &[],
        schema: schemas::products,
    },
    StreamDefinition {
        name: "purchase_orders",
        path: "/v1/PurchaseOrders",
        page_size: ROWS,
        primary_keys: &["id"],
        replication_key: MODIFIED_DATE,
        static_params: &[],
        schema: schemas::purchase_orders,
    },
    StreamDefinition {
        name: "sale_order",
        path: "/v1/SalesOrders",
        page_size: ROWS,
        primary_keys: &["id"],
        replication_key: MODIFIED_DATE,
        static_params: &[],
        schema: schemas::sale_order,
    },
    StreamDefinition {
        name: "stockstream",
        path: "/v1/Stock",
        page_size: ROWS,
        primary_keys: &["productId", "productOptionId", "branchId"],
        replication_key: MODIFIED_DATE,
        static_params: &[],
        schema: schemas::stockstream,
    },
    StreamDefinition {
        name: "voucher",
        path: "/v1/Voucher",
        page_size: ROWS,
        primary_keys: &["customerID"],
        replication_key: None,
        static_params: &[],
        schema: schemas::voucher,
    },
    StreamDefinition {
        name: "contact_supplier",
        path: "/v1/Contacts",
        page_size: ROWS,
        primary_keys: &["id"],
        replication_key: MODIFIED_DATE,
        static_params: &[("where", "type='Supplier'")],
        schema: schemas::contact_supplier,
    },
    StreamDefinition {
        name: "branches",
        path: "/v1/Branches",
        page_size: None,
        primary_keys: &["id"],
        replication_key: MODIFIED_DATE,
        static_params: &[],
        schema: schemas::branches,
    },
];

/// All streams in sync order
pub fn all_streams() -> &'static [StreamDefinition] {
    &STREAMS
}

/// Look up a stream by name
pub fn find_stream(name: &str) -> Result<&'static StreamDefinition> {
    STREAMS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| Error::StreamNotFound {
            stream: name.to_string(),
        })
}

/// Streams selected by a comma-separated filter, in sync order.
///
/// `None` or a blank filter selects every stream. Unknown names are an error.
pub fn select_streams(filter: Option<&str>) -> Result<Vec<&'static StreamDefinition>> {
    let names: Vec<&str> = filter
        .map(|f| {
            f.split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        return Ok(STREAMS.iter().collect());
    }

    for name in &names {
        find_stream(name)?;
    }

    Ok(STREAMS.iter().filter(|s| names.contains(&s.name)).collect())
}

/// Catalog of every stream
pub fn catalog() -> Catalog {
    Catalog {
        streams: STREAMS.iter().map(StreamDefinition::catalog_entry).collect(),
    }
}

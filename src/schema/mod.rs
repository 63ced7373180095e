//! JSON-Schema types
//!
//! Every stream declares its record layout with these types. Fields are
//! nullable by default since the API omits or nulls most of them freely.
//!
//! ```rust,ignore
//! use tap_cin7::schema::{fields, integer, object, string, JsonSchema};
//!
//! let schema = JsonSchema::from_fields(fields([
//!     ("id", integer()),
//!     ("image", object([("link", string())])),
//! ]));
//! ```

mod types;

pub use types::{
    array, boolean, date_time, fields, integer, number, object, one_of, string, JsonSchema,
    JsonType, JsonTypeOrArray, SchemaProperty,
};

//! Schema types

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::String => write!(f, "string"),
            JsonType::Number => write!(f, "number"),
            JsonType::Integer => write!(f, "integer"),
            JsonType::Boolean => write!(f, "boolean"),
            JsonType::Object => write!(f, "object"),
            JsonType::Array => write!(f, "array"),
            JsonType::Null => write!(f, "null"),
        }
    }
}

/// JSON type can be a single type or array of types (for nullable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonTypeOrArray {
    Single(JsonType),
    Multiple(Vec<JsonType>),
}

impl JsonTypeOrArray {
    /// Create a single type
    pub fn single(t: JsonType) -> Self {
        JsonTypeOrArray::Single(t)
    }

    /// Create a nullable type
    pub fn nullable(t: JsonType) -> Self {
        if t == JsonType::Null {
            JsonTypeOrArray::Single(JsonType::Null)
        } else {
            JsonTypeOrArray::Multiple(vec![t, JsonType::Null])
        }
    }

    /// Check if this type is nullable
    pub fn is_nullable(&self) -> bool {
        match self {
            JsonTypeOrArray::Single(JsonType::Null) => true,
            JsonTypeOrArray::Multiple(types) => types.contains(&JsonType::Null),
            JsonTypeOrArray::Single(_) => false,
        }
    }

    /// Get the primary (non-null) type
    pub fn primary_type(&self) -> Option<JsonType> {
        match self {
            JsonTypeOrArray::Single(t) => Some(*t),
            JsonTypeOrArray::Multiple(types) => {
                types.iter().copied().find(|t| *t != JsonType::Null)
            }
        }
    }

    /// Make this type nullable
    pub fn make_nullable(&self) -> Self {
        match self {
            _ if self.is_nullable() => self.clone(),
            JsonTypeOrArray::Single(t) => JsonTypeOrArray::nullable(*t),
            JsonTypeOrArray::Multiple(types) => {
                let mut types = types.clone();
                types.push(JsonType::Null);
                JsonTypeOrArray::Multiple(types)
            }
        }
    }
}

/// JSON Schema property definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    /// Property type(s)
    #[serde(rename = "type")]
    pub json_type: JsonTypeOrArray,

    /// Format hint (e.g., "date-time")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Nested properties (for objects)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaProperty>>,

    /// Array items schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaProperty>>,
}

impl SchemaProperty {
    /// Create a new property with the given type
    pub fn new(json_type: JsonType) -> Self {
        Self {
            json_type: JsonTypeOrArray::single(json_type),
            format: None,
            properties: None,
            items: None,
        }
    }

    /// Create a nullable property
    pub fn nullable(json_type: JsonType) -> Self {
        Self {
            json_type: JsonTypeOrArray::nullable(json_type),
            ..Self::new(json_type)
        }
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Make this property required (drops `null` from its types)
    #[must_use]
    pub fn required(mut self) -> Self {
        if let Some(primary) = self.json_type.primary_type() {
            self.json_type = JsonTypeOrArray::single(primary);
        }
        self
    }

    /// Make this property nullable
    pub fn make_nullable(&mut self) {
        self.json_type = self.json_type.make_nullable();
    }

    /// Check if nullable
    pub fn is_nullable(&self) -> bool {
        self.json_type.is_nullable()
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Nullable string
pub fn string() -> SchemaProperty {
    SchemaProperty::nullable(JsonType::String)
}

/// Nullable integer
pub fn integer() -> SchemaProperty {
    SchemaProperty::nullable(JsonType::Integer)
}

/// Nullable number
pub fn number() -> SchemaProperty {
    SchemaProperty::nullable(JsonType::Number)
}

/// Nullable boolean
pub fn boolean() -> SchemaProperty {
    SchemaProperty::nullable(JsonType::Boolean)
}

/// Nullable string in `date-time` format
pub fn date_time() -> SchemaProperty {
    string().with_format("date-time")
}

/// Nullable object with the given fields
pub fn object<const N: usize>(props: [(&str, SchemaProperty); N]) -> SchemaProperty {
    SchemaProperty {
        properties: Some(fields(props)),
        ..SchemaProperty::nullable(JsonType::Object)
    }
}

/// Nullable array of `items`
pub fn array(items: SchemaProperty) -> SchemaProperty {
    SchemaProperty {
        items: Some(Box::new(items)),
        ..SchemaProperty::nullable(JsonType::Array)
    }
}

/// Nullable value of any of the given types
pub fn one_of(types: &[JsonType]) -> SchemaProperty {
    let mut prop = SchemaProperty::new(JsonType::Null);
    prop.json_type = JsonTypeOrArray::Multiple(types.to_vec());
    prop.make_nullable();
    prop
}

/// Collect named properties into a field map
pub fn fields<const N: usize>(
    props: [(&str, SchemaProperty); N],
) -> BTreeMap<String, SchemaProperty> {
    props
        .into_iter()
        .map(|(name, prop)| (name.to_string(), prop))
        .collect()
}

// ============================================================================
// JsonSchema
// ============================================================================

/// Full JSON Schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Schema type (always "object" for top-level)
    #[serde(rename = "type")]
    pub json_type: JsonType,

    /// Object properties
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,

    /// Required properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Allow additional properties
    #[serde(rename = "additionalProperties", default = "default_true")]
    pub additional_properties: bool,
}

fn default_true() -> bool {
    true
}

impl Default for JsonSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSchema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self {
            json_type: JsonType::Object,
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional_properties: true,
        }
    }

    /// Create a schema from a field map
    pub fn from_fields(properties: BTreeMap<String, SchemaProperty>) -> Self {
        Self {
            properties,
            ..Self::new()
        }
    }

    /// Add a property
    pub fn add_property(&mut self, name: &str, property: SchemaProperty) {
        self.properties.insert(name.to_string(), property);
    }

    /// Add a required property
    pub fn add_required(&mut self, name: &str) {
        if !self.is_required(name) {
            self.required.push(name.to_string());
        }
    }

    /// Check if a property is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|n| n == name)
    }

    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_default()
    }
}

use {
    crate::{
        flatten_json_value::{
            DEFAULT_SEPARATOR,
            flatten::{flattened_with_separator, normalized},
        },
        table::Table,
    },
    serde::Serialize,
    serde_json::{Map, Value},
    std::{fmt::Debug, iter::once},
    tap::{Pipe, Tap},
    tracing::instrument,
};

/// Column name used for scalar roots and for non-object array elements under
/// the flatten policy.
pub const SCALAR_COLUMN: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Flatten nested objects and arrays-of-objects into path-keyed columns.
    pub flatten_nested: bool,
    /// With flattening off, expand nested objects into dotted-path columns
    /// instead of falling back to raw top-level columns.
    pub normalize_data: bool,
    /// Separator joining path segments under the flatten policy.
    pub separator: char,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            flatten_nested: true,
            normalize_data: true,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Could not serialize the struct to value")]
    SerializingToValue(#[source] serde_json::Error),
    #[error("Error converting JSON to CSV: {message}")]
    Conversion { message: String },
}

type Result<T> = std::result::Result<T, self::Error>;

/// Parses `raw` as JSON text and tabularizes it under the selected policy.
///
/// Either returns a fully formed [`Table`] or an error; no partial result is
/// ever produced.
#[instrument(skip(raw), fields(len = raw.len()))]
pub fn convert(raw: &str, options: ConvertOptions) -> Result<Table> {
    serde_json::from_str::<Value>(raw)
        .map_err(self::Error::InvalidJson)
        .and_then(|value| convert_value(value, options))
}

/// Same pipeline entered with an in-memory value instead of JSON text.
pub fn convert_serialized<T: Serialize + Debug>(value: &T, options: ConvertOptions) -> Result<Table> {
    serde_json::to_value(value)
        .map_err(self::Error::SerializingToValue)
        .and_then(|value| convert_value(value, options))
}

pub fn convert_value(value: Value, options: ConvertOptions) -> Result<Table> {
    tracing::debug!(root = root_type(&value), "dispatching on root type");
    match value {
        Value::Array(elements) => convert_elements(elements, options),
        // A single object is a one-element array under every policy.
        object @ Value::Object(_) => convert_elements(vec![object], options),
        scalar => scalar_record(scalar)
            .pipe(once)
            .pipe(Table::from_records)
            .pipe(Ok),
    }
}

fn convert_elements(elements: Vec<Value>, options: ConvertOptions) -> Result<Table> {
    elements
        .into_iter()
        .enumerate()
        .map(|(idx, element)| match (element, options.flatten_nested, options.normalize_data) {
            (Value::Object(map), true, _) => {
                flattened_with_separator(Value::Object(map), options.separator).pipe(Ok)
            }
            (element, true, _) => scalar_record(element).pipe(Ok),
            (Value::Object(map), false, true) => normalized(Value::Object(map)).pipe(Ok),
            // Un-flattened top-level columns; nested values stay raw in their
            // cells. Only useful for already-flat records.
            (Value::Object(map), false, false) => Ok(map),
            (other, false, _) => Err(self::Error::Conversion {
                message: format!(
                    "element #{idx} is not an object (found {}), which the selected options cannot tabularize",
                    root_type(&other)
                ),
            }),
        })
        .collect::<Result<Vec<_>>>()
        .map(Table::from_records)
}

fn scalar_record(value: Value) -> Map<String, Value> {
    Map::new().tap_mut(|record| {
        record.insert(SCALAR_COLUMN.to_string(), value);
    })
}

fn root_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

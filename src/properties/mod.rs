//! Configuration serialization.
//!
//! A pure translation from a component's nested configuration bag into the
//! target dialect's two property encodings: an ordered flat key/value list
//! and tabular fragments for array-of-object values. The rules are applied
//! deterministically — output order is the bag's insertion order, which makes
//! repeated compiles byte-identical and diffable.

use crate::error::UnsupportedConfigError;
use ahash::AHashSet;
use itertools::Itertools;
use serde_json::{Map, Value};

/// Marker value treated as "absent" during normalization.
pub const PLACEHOLDER_MARKER: &str = "<<unset>>";

/// Keys that keep an explicitly empty value instead of being omitted.
/// These carry namespace/mapping context where emptiness is meaningful.
pub const ALLOWED_EMPTY_KEYS: &[&str] = &["namespaceMapping", "mappingContext", "wrapContent"];

/// One flattened key/value pair destined for the extension property block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
}

/// One row of a table fragment: named cells in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<(String, String)>,
}

/// A tabular encoding of an array-of-object configuration value,
/// referenced by a single derived key (`headers` → `headerTable`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFragment {
    pub key: String,
    pub rows: Vec<TableRow>,
}

/// The serializer's output: flat properties plus table fragments.
#[derive(Debug, Clone, Default)]
pub struct SerializedConfig {
    pub flat: Vec<PropertyEntry>,
    pub tables: Vec<TableFragment>,
}

/// Per-component-kind flatten mapping: for each nested parent key, the
/// child-key → flattened-key renames. A nested object whose parent or child
/// key is absent from the table is unsupported input, never silently dropped.
pub type FlattenRules = &'static [(&'static str, &'static [(&'static str, &'static str)])];

/// Serialize a configuration bag.
///
/// `component_id` is only used to label errors.
pub fn serialize_config(
    component_id: &str,
    config: &Map<String, Value>,
    rules: FlattenRules,
) -> Result<SerializedConfig, UnsupportedConfigError> {
    let mut out = SerializedConfig::default();

    for (key, value) in config {
        match value {
            Value::Object(nested) => {
                flatten_nested(component_id, key, nested, rules, &mut out.flat)?;
            }
            Value::Array(items) => {
                serialize_array(component_id, key, items, &mut out)?;
            }
            scalar => {
                if let Some(rendered) = normalize_scalar(key, scalar) {
                    out.flat.push(PropertyEntry {
                        key: key.clone(),
                        value: rendered,
                    });
                }
            }
        }
    }

    // A table key shadowing a flat key means the bag encodes the same
    // concern twice; rejecting beats guessing a winner.
    let flat_keys: AHashSet<&str> = out.flat.iter().map(|p| p.key.as_str()).collect();
    for table in &out.tables {
        if flat_keys.contains(table.key.as_str()) {
            return Err(UnsupportedConfigError::AmbiguousOverlap {
                component_id: component_id.to_string(),
                key: table.key.clone(),
            });
        }
    }

    Ok(out)
}

fn flatten_nested(
    component_id: &str,
    parent_key: &str,
    nested: &Map<String, Value>,
    rules: FlattenRules,
    flat: &mut Vec<PropertyEntry>,
) -> Result<(), UnsupportedConfigError> {
    let Some((_, renames)) = rules.iter().find(|(parent, _)| *parent == parent_key) else {
        return Err(UnsupportedConfigError::UnmappedNested {
            component_id: component_id.to_string(),
            key: parent_key.to_string(),
        });
    };

    for (child_key, child_value) in nested {
        let Some((_, flat_key)) = renames.iter().find(|(child, _)| child == child_key) else {
            return Err(UnsupportedConfigError::UnmappedNested {
                component_id: component_id.to_string(),
                key: format!("{parent_key}.{child_key}"),
            });
        };
        match child_value {
            Value::Object(_) => {
                // One level of nesting only.
                return Err(UnsupportedConfigError::UnmappedNested {
                    component_id: component_id.to_string(),
                    key: format!("{parent_key}.{child_key}"),
                });
            }
            Value::Array(items) => {
                if items.iter().any(|v| v.is_object() || v.is_array()) {
                    return Err(UnsupportedConfigError::UnmappedNested {
                        component_id: component_id.to_string(),
                        key: format!("{parent_key}.{child_key}"),
                    });
                }
                if let Some(joined) = join_scalars(items) {
                    flat.push(PropertyEntry {
                        key: (*flat_key).to_string(),
                        value: joined,
                    });
                }
            }
            scalar => {
                if let Some(rendered) = normalize_scalar(flat_key, scalar) {
                    flat.push(PropertyEntry {
                        key: (*flat_key).to_string(),
                        value: rendered,
                    });
                }
            }
        }
    }
    Ok(())
}

fn serialize_array(
    component_id: &str,
    key: &str,
    items: &[Value],
    out: &mut SerializedConfig,
) -> Result<(), UnsupportedConfigError> {
    if items.is_empty() {
        return Ok(());
    }
    let objects = items.iter().filter(|v| v.is_object()).count();
    if objects == items.len() {
        let mut rows = Vec::with_capacity(items.len());
        for (ri, item) in items.iter().enumerate() {
            let Value::Object(cells) = item else {
                unreachable!()
            };
            let mut row = TableRow { cells: Vec::new() };
            for (cell_key, cell_value) in cells {
                match cell_value {
                    Value::Object(_) | Value::Array(_) => {
                        return Err(UnsupportedConfigError::UnmappedNested {
                            component_id: component_id.to_string(),
                            key: format!("{key}[{ri}].{cell_key}"),
                        });
                    }
                    scalar => {
                        row.cells
                            .push((cell_key.clone(), scalar_text(scalar).unwrap_or_default()));
                    }
                }
            }
            rows.push(row);
        }
        out.tables.push(TableFragment {
            key: table_key(key),
            rows,
        });
    } else if objects == 0 {
        if let Some(joined) = join_scalars(items) {
            out.flat.push(PropertyEntry {
                key: key.to_string(),
                value: joined,
            });
        }
    } else {
        return Err(UnsupportedConfigError::MixedArray {
            component_id: component_id.to_string(),
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Derived table key: singularized parent key plus `Table`.
fn table_key(key: &str) -> String {
    let singular = if let Some(stem) = key.strip_suffix("ies") {
        format!("{stem}y")
    } else {
        key.strip_suffix('s').unwrap_or(key).to_string()
    };
    format!("{singular}Table")
}

/// Comma-join an array of scalars; `None` when nothing remains after
/// dropping absent members.
fn join_scalars(items: &[Value]) -> Option<String> {
    let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.iter().join(","))
    }
}

/// Normalize one scalar for the flat list. Returns `None` when the value is
/// absent (`null`, empty, placeholder) and the key is not allowed to stay
/// explicitly empty.
fn normalize_scalar(key: &str, value: &Value) -> Option<String> {
    let rendered = scalar_text(value);
    match rendered {
        Some(text) => Some(text),
        None if ALLOWED_EMPTY_KEYS.contains(&key) => Some(String::new()),
        None => None,
    }
}

/// Scalar to text, with absent markers mapped to `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() || s == PLACEHOLDER_MARKER => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) | Value::Array(_) => None,
    }
}

/// Escape the five XML-reserved characters for text and attribute positions.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

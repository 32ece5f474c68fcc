//! Blueprint document parsing and structural validation.
//!
//! Deserialization is split in two: serde reads the document into raw structs
//! whose fields are all optional, and a validation pass turns those into the
//! canonical [`Blueprint`] model. The split exists so every violation can be
//! reported with a JSON-path-like location instead of a bare serde message.

use super::definition::{Blueprint, ComponentDefinition, EndpointDefinition, FlowEdgeDefinition};
use crate::error::SchemaError;
use ahash::AHashSet;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize)]
struct RawBlueprint {
    id: Option<String>,
    name: Option<String>,
    version: Option<String>,
    endpoints: Option<Vec<RawEndpoint>>,
}

#[derive(Deserialize)]
struct RawEndpoint {
    id: Option<String>,
    name: Option<String>,
    components: Option<Vec<RawComponent>>,
    #[serde(default, alias = "sequenceFlows")]
    sequence_flows: Vec<RawFlow>,
}

#[derive(Deserialize)]
struct RawComponent {
    #[serde(rename = "type")]
    type_name: Option<String>,
    id: Option<String>,
    name: Option<String>,
    config: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct RawFlow {
    id: Option<String>,
    source: Option<String>,
    target: Option<String>,
}

/// Parse and validate a blueprint document.
///
/// Pure: no I/O, and it never partially succeeds — the first structural
/// violation aborts with a [`SchemaError`] naming the offending path.
pub fn parse_blueprint(raw_document: &str) -> Result<Blueprint, SchemaError> {
    let raw: RawBlueprint =
        serde_json::from_str(raw_document).map_err(|e| SchemaError::Json(e.to_string()))?;
    validate(raw)
}

fn validate(raw: RawBlueprint) -> Result<Blueprint, SchemaError> {
    let id = required(raw.id, "id")?;
    let name = required(raw.name, "name")?;
    let version = required(raw.version, "version")?;
    let raw_endpoints = raw.endpoints.ok_or_else(|| SchemaError::MissingField {
        path: "endpoints".to_string(),
    })?;

    let mut endpoint_ids: AHashSet<String> = AHashSet::new();
    let mut endpoints = Vec::with_capacity(raw_endpoints.len());
    for (ei, raw_endpoint) in raw_endpoints.into_iter().enumerate() {
        let endpoint = validate_endpoint(raw_endpoint, ei)?;
        if !endpoint_ids.insert(endpoint.id.clone()) {
            return Err(SchemaError::DuplicateIdentifier {
                path: format!("endpoints[{ei}].id"),
                id: endpoint.id,
            });
        }
        endpoints.push(endpoint);
    }

    Ok(Blueprint {
        id,
        name,
        version,
        endpoints,
    })
}

fn validate_endpoint(raw: RawEndpoint, ei: usize) -> Result<EndpointDefinition, SchemaError> {
    let id = required(raw.id, &format!("endpoints[{ei}].id"))?;
    let name = raw.name.unwrap_or_else(|| id.clone());

    let raw_components = raw.components.ok_or_else(|| SchemaError::MissingField {
        path: format!("endpoints[{ei}].components"),
    })?;
    if raw_components.is_empty() {
        return Err(SchemaError::EmptyEndpoint {
            path: format!("endpoints[{ei}]"),
        });
    }

    let mut component_ids: AHashSet<String> = AHashSet::new();
    let mut components = Vec::with_capacity(raw_components.len());
    for (ci, raw_component) in raw_components.into_iter().enumerate() {
        let path = format!("endpoints[{ei}].components[{ci}]");
        let component = ComponentDefinition {
            type_name: required(raw_component.type_name, &format!("{path}.type"))?,
            id: required(raw_component.id, &format!("{path}.id"))?,
            name: raw_component.name.unwrap_or_default(),
            config: raw_component.config.ok_or_else(|| SchemaError::MissingField {
                path: format!("{path}.config"),
            })?,
        };
        if !component_ids.insert(component.id.clone()) {
            return Err(SchemaError::DuplicateIdentifier {
                path: format!("{path}.id"),
                id: component.id,
            });
        }
        components.push(component);
    }

    let mut flow_ids: AHashSet<String> = AHashSet::new();
    let mut sequence_flows = Vec::with_capacity(raw.sequence_flows.len());
    for (fi, raw_flow) in raw.sequence_flows.into_iter().enumerate() {
        let path = format!("endpoints[{ei}].sequence_flows[{fi}]");
        let flow = FlowEdgeDefinition {
            id: required(raw_flow.id, &format!("{path}.id"))?,
            source: required(raw_flow.source, &format!("{path}.source"))?,
            target: required(raw_flow.target, &format!("{path}.target"))?,
        };
        if !flow_ids.insert(flow.id.clone()) {
            return Err(SchemaError::DuplicateIdentifier {
                path: format!("{path}.id"),
                id: flow.id,
            });
        }
        sequence_flows.push(flow);
    }

    Ok(EndpointDefinition {
        id,
        name,
        components,
        sequence_flows,
    })
}

fn required(value: Option<String>, path: &str) -> Result<String, SchemaError> {
    match value {
        None => Err(SchemaError::MissingField {
            path: path.to_string(),
        }),
        Some(s) if s.is_empty() => Err(SchemaError::EmptyField {
            path: path.to_string(),
        }),
        Some(s) => Ok(s),
    }
}

use serde_json::{Map, Value};

/// The complete, validated definition of an integration blueprint, ready for
/// compilation. This is the target structure for any custom format conversion.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    pub version: String,
    pub endpoints: Vec<EndpointDefinition>,
}

/// One named sub-flow within a blueprint: an ordered list of processing
/// components and the directed edges between them.
#[derive(Debug, Clone, Default)]
pub struct EndpointDefinition {
    pub id: String,
    pub name: String,
    pub components: Vec<ComponentDefinition>,
    pub sequence_flows: Vec<FlowEdgeDefinition>,
}

/// One processing step: a type discriminator from the closed component
/// catalog, an identifier, a display name, and a configuration bag.
///
/// The configuration bag keeps the document's key order; the property
/// serializer depends on that for reproducible output.
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    pub type_name: String,
    pub id: String,
    pub name: String,
    pub config: Map<String, Value>,
}

/// A directed edge between two nodes. `source` and `target` are component
/// identifiers or one of the reserved sentinel references (`START`, `END`).
#[derive(Debug, Clone)]
pub struct FlowEdgeDefinition {
    pub id: String,
    pub source: String,
    pub target: String,
}

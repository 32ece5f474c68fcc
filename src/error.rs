use thiserror::Error;

/// Errors raised while parsing and validating a blueprint document.
///
/// Every variant names the offending location as a JSON-path-like string
/// (e.g. `endpoints[2].components[5].id`) so callers can point users at the
/// exact spot in their input.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Failed to parse blueprint JSON: {0}")]
    Json(String),

    #[error("Missing required field at '{path}'")]
    MissingField { path: String },

    #[error("Field at '{path}' must not be empty")]
    EmptyField { path: String },

    #[error("Endpoint at '{path}' declares no components")]
    EmptyEndpoint { path: String },

    #[error("Duplicate identifier '{id}' at '{path}'")]
    DuplicateIdentifier { path: String, id: String },
}

/// Errors raised while resolving sequence flows into per-node wiring.
#[derive(Error, Debug, Clone)]
pub enum ReferenceError {
    #[error("Sequence flow '{flow_id}' references unknown node '{reference}' as its {role}")]
    UnknownNode {
        flow_id: String,
        reference: String,
        role: &'static str,
    },

    #[error("Node '{node_id}' is not connected: at least one {missing} edge is required")]
    OrphanNode {
        node_id: String,
        missing: &'static str,
    },
}

/// Errors raised while serializing a component's configuration bag.
#[derive(Error, Debug, Clone)]
pub enum UnsupportedConfigError {
    #[error("Component '{component_id}': nested object under key '{key}' has no flatten rule")]
    UnmappedNested { component_id: String, key: String },

    #[error("Component '{component_id}': array under key '{key}' mixes objects and scalars")]
    MixedArray { component_id: String, key: String },

    #[error(
        "Component '{component_id}': table key '{key}' collides with a scalar property of the same name"
    )]
    AmbiguousOverlap { component_id: String, key: String },
}

/// Errors raised while generating a component's XML fragment.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("Component '{component_id}' has unknown type discriminator '{type_name}'")]
    UnknownComponentType {
        component_id: String,
        type_name: String,
    },

    #[error(transparent)]
    Config(#[from] UnsupportedConfigError),
}

/// Errors raised while writing the final package archive.
#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("I/O failure at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive write failure at '{path}': {message}")]
    Archive { path: String, message: String },
}

/// Top-level error for the whole compile pipeline.
///
/// Every stage fails fast; the first error aborts the compile with no
/// partial output.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Failed to read blueprint at '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Packaging(#[from] PackagingError),
}

impl From<UnsupportedConfigError> for CompileError {
    fn from(err: UnsupportedConfigError) -> Self {
        CompileError::Template(TemplateError::Config(err))
    }
}

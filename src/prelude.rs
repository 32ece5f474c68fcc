//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! tsunagi crate. Import this module to get access to the core functionality
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use tsunagi::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = std::fs::read_to_string("path/to/blueprint.json")?;
//! let blueprint = parse_blueprint(&raw)?;
//!
//! let artifact = Compiler::builder(blueprint).build().compile()?;
//! println!("{}", artifact.xml);
//! # Ok(())
//! # }
//! ```

// Core compilation pipeline
pub use crate::compiler::{compile, Compiler, CompilerBuilder};

// Blueprint model
pub use crate::blueprint::{
    parse_blueprint, Blueprint, ComponentDefinition, EndpointDefinition, FlowEdgeDefinition,
    IntoBlueprint,
};

// Resolution and assembly
pub use crate::document::OutputArtifact;
pub use crate::graph::{IdAllocator, ResolveOptions, ResolvedGraph, ResolvedNode};
pub use crate::package::PackageMeta;
pub use crate::template::{ComponentKind, Role};

// Error types
pub use crate::error::{
    CompileError, PackagingError, ReferenceError, SchemaError, TemplateError,
    UnsupportedConfigError,
};

// Standard library re-exports commonly used with this crate
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

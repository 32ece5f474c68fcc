//! # Tsunagi - Blueprint Compilation Engine
//!
//! **Tsunagi** transforms integration-flow blueprints — JSON documents naming
//! processing components, their configuration, and the control-flow edges
//! between them — into deployable integration artifacts: a BPMN-2.0-derived
//! XML dialect with vendor extension properties, packaged as an archive with
//! manifest metadata.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic at the edges and strict in the middle. The
//! primary workflow is:
//!
//! 1.  **Parse**: Load a blueprint document with [`blueprint::parse_blueprint`],
//!     or convert your own authoring format via the
//!     [`blueprint::IntoBlueprint`] trait.
//! 2.  **Compile**: Use [`Compiler::builder`] to run the pipeline — flow-graph
//!     resolution, per-component fragment generation, document assembly.
//! 3.  **Package**: Hand the resulting artifact to [`package::build`] (or use
//!     the one-call [`compile`] surface) to produce the final archive.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tsunagi::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let raw = std::fs::read_to_string("blueprint.json")?;
//!     let blueprint = parse_blueprint(&raw)?;
//!     let meta = PackageMeta::from(&blueprint);
//!
//!     // Run the in-memory pipeline.
//!     let artifact = Compiler::builder(blueprint).build().compile()?;
//!     println!("Assembled {} bytes of XML", artifact.xml.len());
//!
//!     // Write the deployable archive.
//!     let path = tsunagi::package::build(
//!         &artifact,
//!         &meta,
//!         Path::new("target/out"),
//!         "order_sync",
//!     )?;
//!     println!("Package at {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! Every stage validates eagerly and stops the whole compile on the first
//! error; errors always carry the offending endpoint/component/flow id.

pub mod blueprint;
pub mod compiler;
pub mod document;
pub mod error;
pub mod graph;
pub mod package;
pub mod prelude;
pub mod properties;
pub mod template;

pub use compiler::{compile, Compiler, CompilerBuilder};

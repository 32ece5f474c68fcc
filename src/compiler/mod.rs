//! Compilation pipeline.
//!
//! A pure, single-threaded pipeline per endpoint: resolution → fragment
//! generation → assembly. Endpoints are independent, so callers may compile
//! disjoint blueprints from multiple threads; the compiler itself holds no
//! shared mutable state and never retries — every detected error is
//! structural, not transient.

use crate::blueprint::{parse_blueprint, Blueprint};
use crate::document::{assemble, EndpointArtifacts, OutputArtifact};
use crate::error::CompileError;
use crate::graph::{resolve, IdAllocator, NodeOrigin, ResolveOptions};
use crate::package::{self, PackageMeta};
use crate::template;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Compiler {
    blueprint: Blueprint,
    options: ResolveOptions,
}

pub struct CompilerBuilder {
    blueprint: Blueprint,
    options: ResolveOptions,
}

impl CompilerBuilder {
    pub fn new(blueprint: Blueprint) -> Self {
        Self {
            blueprint,
            options: ResolveOptions::default(),
        }
    }

    /// Accept endpoints containing nodes without full wiring instead of
    /// rejecting them as orphans.
    pub fn allow_disconnected(mut self, allow: bool) -> Self {
        self.options.allow_disconnected = allow;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            blueprint: self.blueprint,
            options: self.options,
        }
    }
}

impl Compiler {
    pub fn builder(blueprint: Blueprint) -> CompilerBuilder {
        CompilerBuilder::new(blueprint)
    }

    /// Run the full in-memory pipeline and produce the assembled document.
    ///
    /// Fails fast on the first structural error; no partial output survives.
    pub fn compile(self) -> Result<OutputArtifact, CompileError> {
        tracing::info!(
            blueprint = %self.blueprint.id,
            endpoints = self.blueprint.endpoints.len(),
            "compiling blueprint"
        );

        let mut ids = IdAllocator::new();
        let mut endpoint_artifacts = Vec::with_capacity(self.blueprint.endpoints.len());

        for endpoint in &self.blueprint.endpoints {
            tracing::debug!(endpoint = %endpoint.id, "resolving flow graph");
            let graph = resolve(endpoint, &mut ids, self.options)?;

            tracing::debug!(
                endpoint = %endpoint.id,
                nodes = graph.nodes.len(),
                "generating fragments"
            );
            let mut fragments = Vec::new();
            for node in &graph.nodes {
                if let NodeOrigin::Component(ci) = node.origin {
                    fragments.push(template::generate(node, &endpoint.components[ci])?);
                }
            }

            endpoint_artifacts.push(EndpointArtifacts {
                endpoint_id: endpoint.id.clone(),
                endpoint_name: endpoint.name.clone(),
                graph,
                fragments,
            });
        }

        let artifact = assemble(&self.blueprint, &endpoint_artifacts, &mut ids);
        tracing::info!(
            bytes = artifact.xml.len(),
            resources = artifact.resources.len(),
            "document assembled"
        );
        Ok(artifact)
    }
}

/// The one-call surface: read a blueprint file, compile it, and package the
/// result. Returns the path of the written archive.
pub fn compile(
    blueprint_path: &Path,
    output_dir: &Path,
    artifact_name: &str,
) -> Result<PathBuf, CompileError> {
    let raw = fs::read_to_string(blueprint_path).map_err(|e| CompileError::Input {
        path: blueprint_path.display().to_string(),
        source: e,
    })?;
    let blueprint = parse_blueprint(&raw)?;
    let meta = PackageMeta::from(&blueprint);

    let artifact = Compiler::builder(blueprint).build().compile()?;

    let package_path = package::build(&artifact, &meta, output_dir, artifact_name)?;
    tracing::info!(path = %package_path.display(), "package built");
    Ok(package_path)
}

//! Package building.
//!
//! Bundles the assembled document and its ancillary resources into the final
//! archive: a manifest entry, a metadata entry, the document at its fixed
//! internal path, and per-kind resource subtrees. The archive is staged in a
//! temporary file and atomically moved into place, so a mid-write failure
//! never leaves a corrupt package at the destination.

use crate::blueprint::Blueprint;
use crate::document::OutputArtifact;
use crate::error::PackagingError;
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Fixed internal path of the main document, without the file name.
pub const FLOW_PATH: &str = "src/main/resources/scenarioflows/integrationflow";

/// The blueprint metadata that ends up in the manifest.
#[derive(Debug, Clone)]
pub struct PackageMeta {
    pub name: String,
    pub version: String,
}

impl From<&Blueprint> for PackageMeta {
    fn from(blueprint: &Blueprint) -> Self {
        Self {
            name: blueprint.name.clone(),
            version: blueprint.version.clone(),
        }
    }
}

/// Build the package archive and return its final path.
pub fn build(
    artifact: &OutputArtifact,
    meta: &PackageMeta,
    output_dir: &Path,
    artifact_name: &str,
) -> Result<PathBuf, PackagingError> {
    fs::create_dir_all(output_dir).map_err(|e| PackagingError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let final_path = output_dir.join(format!("{artifact_name}.zip"));
    let mut staging = NamedTempFile::new_in(output_dir).map_err(|e| PackagingError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    write_archive(staging.as_file_mut(), artifact, meta, artifact_name).map_err(|message| {
        PackagingError::Archive {
            path: final_path.display().to_string(),
            message,
        }
    })?;

    staging
        .persist(&final_path)
        .map_err(|e| PackagingError::Io {
            path: final_path.display().to_string(),
            source: e.error,
        })?;

    tracing::debug!(path = %final_path.display(), "package written");
    Ok(final_path)
}

fn write_archive(
    file: &mut fs::File,
    artifact: &OutputArtifact,
    meta: &PackageMeta,
    artifact_name: &str,
) -> Result<(), String> {
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut entry = |zip: &mut ZipWriter<&mut fs::File>, path: String, content: &[u8]| {
        zip.start_file(path.clone(), options)
            .map_err(|e| format!("{path}: {e}"))?;
        zip.write_all(content).map_err(|e| format!("{path}: {e}"))
    };

    entry(
        &mut zip,
        "META-INF/MANIFEST.MF".to_string(),
        render_manifest(meta).as_bytes(),
    )?;
    entry(
        &mut zip,
        "metainfo.prop".to_string(),
        render_metainfo(meta).as_bytes(),
    )?;
    entry(
        &mut zip,
        format!("{FLOW_PATH}/{artifact_name}.iflw"),
        artifact.xml.as_bytes(),
    )?;
    for (filename, resource) in &artifact.resources {
        entry(
            &mut zip,
            format!("src/main/resources/{}/{}", resource.kind.directory(), filename),
            resource.content.as_bytes(),
        )?;
    }

    zip.finish().map_err(|e| e.to_string())?;
    Ok(())
}

fn render_manifest(meta: &PackageMeta) -> String {
    let symbolic_name = sanitize_symbolic_name(&meta.name);
    let mut out = String::new();
    let _ = writeln!(out, "Manifest-Version: 1.0");
    let _ = writeln!(out, "Bundle-ManifestVersion: 2");
    let _ = writeln!(out, "Bundle-Name: {}", meta.name);
    let _ = writeln!(out, "Bundle-SymbolicName: {symbolic_name}; singleton:=true");
    let _ = writeln!(out, "Bundle-Version: {}", meta.version);
    let _ = writeln!(out, "SAP-BundleType: IntegrationFlow");
    let _ = writeln!(out, "SAP-NodeType: IFLMAP");
    let _ = writeln!(out, "SAP-RuntimeProfile: iflmap");
    out
}

fn render_metainfo(meta: &PackageMeta) -> String {
    let symbolic_name = sanitize_symbolic_name(&meta.name);
    format!("description=Integration flow {symbolic_name}\nname={symbolic_name}\n")
}

/// Derive a bundle identifier from the display name: non-identifier
/// characters collapse into single underscores, and a leading digit gets an
/// underscore prefix so the result stays a valid identifier.
pub fn sanitize_symbolic_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_gap = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_was_gap = false;
        } else if !last_was_gap {
            out.push('_');
            last_was_gap = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if out.is_empty() {
        return "integration_flow".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_display_names() {
        assert_eq!(sanitize_symbolic_name("Order Sync (v2)"), "Order_Sync_v2");
        assert_eq!(sanitize_symbolic_name("  weird---name  "), "weird_name");
        assert_eq!(sanitize_symbolic_name("42 flows"), "_42_flows");
        assert_eq!(sanitize_symbolic_name("!!!"), "integration_flow");
    }

    #[test]
    fn manifest_carries_name_and_version() {
        let meta = PackageMeta {
            name: "Order Sync".to_string(),
            version: "2.1.0".to_string(),
        };
        let manifest = render_manifest(&meta);
        assert!(manifest.contains("Bundle-SymbolicName: Order_Sync; singleton:=true"));
        assert!(manifest.contains("Bundle-Version: 2.1.0"));
    }
}

//! Artifact export: timestamped text and JSON files per pipeline run.
//!
//! Filenames follow `<sanitized-original-name>_<YYYYMMDD_HHMMSS>.<ext>` so
//! repeated runs over the same document never overwrite each other.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use docpipe_core::PipelineResult;

/// Sanitise an uploaded filename into an artifact stem: spaces become
/// underscores and a trailing `.pdf` (any case) is dropped.
fn sanitize_stem(original_name: &str) -> String {
    let name = original_name.replace(' ', "_");
    match name.to_ascii_lowercase().strip_suffix(".pdf") {
        Some(_) => name[..name.len() - 4].to_string(),
        None => name,
    }
}

fn artifact_path(out_dir: &Path, original_name: &str, ext: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    Ok(out_dir.join(format!("{}_{timestamp}.{ext}", sanitize_stem(original_name))))
}

/// Write the extracted text artifact. Returns the path written.
pub fn save_text(text: &str, original_name: &str, out_dir: &Path) -> anyhow::Result<PathBuf> {
    let path = artifact_path(out_dir, original_name, "txt")?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Write the merged pipeline result as 2-space-indented JSON. Returns the
/// path written.
pub fn save_json(
    result: &PipelineResult,
    original_name: &str,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = artifact_path(out_dir, original_name, "json")?;
    let json = serde_json::to_string_pretty(result)?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

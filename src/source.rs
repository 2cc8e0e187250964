use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::ProjectRecord;
use crate::settings::Settings;

const DEFAULT_PROJECTS_FILE: &str = "projects.json";

/// Read the upstream project list: a JSON array of records, already filtered
/// and ordered by whoever produced it.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read projects from {}", path.display()))?;
    let records: Vec<ProjectRecord> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse projects in {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded projects");
    Ok(records)
}

/// Resolve the projects file.
/// Uses `BUILDLINE_PROJECTS` if set, then the settings file, then
/// `projects.json` in `dir`.
pub fn default_projects_path(dir: &Path, settings: &Settings) -> PathBuf {
    resolve_projects_path(dir, settings, std::env::var("BUILDLINE_PROJECTS").ok())
}

fn resolve_projects_path(dir: &Path, settings: &Settings, env: Option<String>) -> PathBuf {
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    match settings.projects_file.as_deref() {
        Some(file) => dir.join(file),
        None => dir.join(DEFAULT_PROJECTS_FILE),
    }
}

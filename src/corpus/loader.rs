//! @ai:module:intent TOML manifest loader and sample-directory scanner
//! @ai:module:layer infrastructure
//! @ai:module:public_api Manifest, ManifestLoader, TaskScanner
//! @ai:module:stateless true

use crate::config::EstimationConfig;
use crate::corpus::annotation::AnnotationMap;
use crate::corpus::task::{IssueCategory, TaskRecord};
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Task records plus the annotations needed to aggregate them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "task", default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub annotations: AnnotationMap,
}

/// @ai:intent Reads and writes TOML manifests
/// @ai:effects pure (stateless)
pub struct ManifestLoader;

impl ManifestLoader {
    /// @ai:intent Create a new manifest loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Load a manifest file
    /// @ai:pre path points to a valid TOML file
    /// @ai:effects fs:read
    pub fn load(&self, path: &Path) -> Result<Manifest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let manifest: Manifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        tracing::debug!(
            "Loaded {} tasks and {} annotations from {}",
            manifest.tasks.len(),
            manifest.annotations.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// @ai:intent Write a manifest file
    /// @ai:effects fs:write
    pub fn save(&self, manifest: &Manifest, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(manifest)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(())
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Builds task records from a directory of `Task_<NN>_<Label>.<ext>` samples
pub struct TaskScanner {
    file_pattern: Regex,
    issue_pattern: Regex,
}

impl TaskScanner {
    /// @ai:intent Create a scanner with the corpus naming conventions
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            file_pattern: Regex::new(r"^Task_(\d+)_([A-Za-z]+)\.\w+$").expect("Invalid regex"),
            issue_pattern: Regex::new(r"(?m)^\d+\.\s+\S").expect("Invalid regex"),
        }
    }

    /// @ai:intent Scan a directory into task records sorted by id
    /// @ai:effects fs:read
    pub fn scan(&self, dir: &Path, estimation: &EstimationConfig) -> Result<Vec<TaskRecord>> {
        if !dir.is_dir() {
            anyhow::bail!("Task directory not found: {}", dir.display());
        }

        let mut tasks = Vec::new();

        for path in Self::find_sample_files(dir) {
            match self.scan_file(&path, estimation) {
                Ok(Some(task)) => tasks.push(task),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable sample {}: {}", path.display(), e);
                }
            }
        }

        tasks.sort_by_key(|t| t.id);
        tracing::info!("Scanned {} tasks from {}", tasks.len(), dir.display());
        Ok(tasks)
    }

    /// @ai:intent Parse a single sample file, `None` if its name is not a task name
    /// @ai:effects fs:read
    fn scan_file(&self, path: &Path, estimation: &EstimationConfig) -> Result<Option<TaskRecord>> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };

        let Some(caps) = self.file_pattern.captures(file_name) else {
            return Ok(None);
        };

        let id: u32 = caps[1]
            .parse()
            .with_context(|| format!("Invalid task number in {}", file_name))?;

        let Some(category) = IssueCategory::from_label(&caps[2]) else {
            tracing::warn!("Skipping {}: unknown category label {}", path.display(), &caps[2]);
            return Ok(None);
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample: {}", path.display()))?;

        let line_count = count_lines(&content);
        let review_minutes = estimation.estimate(line_count)?;

        Ok(Some(TaskRecord {
            id,
            category,
            line_count,
            review_minutes,
            declared_issues: self.count_declared_issues(&content),
            source: Some(path.display().to_string()),
        }))
    }

    /// @ai:intent Count top-level numbered items in the leading docstring
    /// @ai:effects pure
    fn count_declared_issues(&self, content: &str) -> Option<u32> {
        let mut blocks = content.split("\"\"\"");
        blocks.next()?;
        let header = blocks.next()?;

        let count = self.issue_pattern.find_iter(header).count();
        (count > 0).then_some(count as u32)
    }

    /// @ai:intent Find candidate sample files in directory
    /// @ai:effects fs:read
    fn find_sample_files(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

impl Default for TaskScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Line count as an editor numbers lines: the empty line after a trailing
/// newline counts.
fn count_lines(content: &str) -> u32 {
    if content.is_empty() {
        return 0;
    }
    content.split('\n').count() as u32
}

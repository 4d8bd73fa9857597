//! @ai:module:intent Configuration structs for the review metrics tool
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportConfig, PathConfig, ReportOptions, EstimationConfig, FilterConfig
//! @ai:module:stateless true

use crate::corpus::{IssueCategory, ValueRange};
use crate::error;
use crate::metrics::ComplexityBucket;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the review metrics tool
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub report: ReportOptions,
    #[serde(default)]
    pub estimation: EstimationConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// @ai:intent Path configuration for input/output locations
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub manifest: PathBuf,
    pub tasks_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// @ai:intent Rendering options
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_charts")]
    pub charts: bool,
}

/// @ai:intent Review-time estimation for scanned sample files
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationConfig {
    #[serde(default = "default_minutes_per_hundred_lines")]
    pub minutes_per_hundred_lines: ValueRange<f64>,
}

/// @ai:intent Filter configuration for selecting tasks
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub categories: Option<Vec<String>>,
    pub buckets: Option<Vec<String>>,
    pub task_ids: Option<Vec<u32>>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("manifest.toml"),
            tasks_dir: PathBuf::from("tasks"),
            output_dir: PathBuf::from("reports"),
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: default_title(),
            charts: default_charts(),
        }
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            minutes_per_hundred_lines: default_minutes_per_hundred_lines(),
        }
    }
}

fn default_title() -> String {
    "Code Review Task Analysis".to_string()
}

fn default_charts() -> bool {
    true
}

fn default_minutes_per_hundred_lines() -> ValueRange<f64> {
    ValueRange::from_ordered(5.0, 10.0)
}

impl ReportConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl EstimationConfig {
    /// @ai:intent Estimate a review-minute range from a line count
    /// @ai:effects pure
    pub fn estimate(&self, line_count: u32) -> error::Result<ValueRange<u32>> {
        let scale = |rate: f64| {
            let minutes = (f64::from(line_count) * rate / 100.0).ceil();
            (minutes as u32).max(1)
        };

        let rate = self.minutes_per_hundred_lines;
        ValueRange::new(scale(rate.min()), scale(rate.max()))
    }
}

impl FilterConfig {
    /// @ai:intent Check if filter matches a task
    /// @ai:effects pure
    pub fn matches(&self, category: &str, bucket: &str, id: u32) -> bool {
        let category_match = self
            .categories
            .as_ref()
            .map(|c| {
                c.iter().any(|cat| {
                    IssueCategory::from_label(cat).is_some_and(|known| known.as_str() == category)
                })
            })
            .unwrap_or(true);

        let bucket_match = self
            .buckets
            .as_ref()
            .map(|b| b.iter().any(|name| name.eq_ignore_ascii_case(bucket)))
            .unwrap_or(true);

        let id_match = self
            .task_ids
            .as_ref()
            .map(|ids| ids.contains(&id))
            .unwrap_or(true);

        category_match && bucket_match && id_match
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_none() && self.buckets.is_none() && self.task_ids.is_none()
    }

    /// @ai:intent Reject category or bucket names that could never match a task
    /// @ai:effects pure
    pub fn validate(&self) -> anyhow::Result<()> {
        for label in self.categories.iter().flatten() {
            if IssueCategory::from_label(label).is_none() {
                anyhow::bail!("Unknown category in filter: {}", label);
            }
        }

        for name in self.buckets.iter().flatten() {
            if !ComplexityBucket::ALL
                .iter()
                .any(|b| b.as_str().eq_ignore_ascii_case(name))
            {
                anyhow::bail!("Unknown complexity bucket in filter: {}", name);
            }
        }

        Ok(())
    }
}

//! @ai:module:intent Report generation for review metrics summaries
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReviewReport, ReportGenerator, JsonReporter, MarkdownReporter, ChartGenerator

pub mod charts;
pub mod json_report;
pub mod markdown_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::corpus::TaskRecord;
use crate::metrics::AggregateSummary;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent A summary together with the tasks and metadata it was built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    pub title: String,
    pub generated_at: String,
    /// Where the tasks came from, e.g. a manifest path
    pub source: String,
    pub summary: AggregateSummary,
    pub tasks: Vec<TaskRecord>,
}

impl ReviewReport {
    /// @ai:intent Wrap a summary, stamping the current time
    /// @ai:effects time
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        summary: AggregateSummary,
        mut tasks: Vec<TaskRecord>,
    ) -> Self {
        tasks.sort_by_key(|t| t.id);

        Self {
            title: title.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: source.into(),
            summary,
            tasks,
        }
    }
}

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Generate all reports, returning the written paths
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        report: &ReviewReport,
        output_dir: &Path,
        with_charts: bool,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let json_path = output_dir.join("summary.json");
        self.json.generate(report, &json_path)?;

        let markdown_path = output_dir.join("summary.md");
        self.markdown.generate(report, &markdown_path)?;

        let mut written = vec![json_path, markdown_path];

        if with_charts {
            for name in self.charts.generate_all(report, output_dir)? {
                written.push(output_dir.join(name));
            }
        }

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(written)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::corpus::{AnnotationMap, CategoryAnnotation, IssueCategory, ValueRange};
    use crate::metrics::{MetricsAggregator, MetricsAggregatorTrait};
    use tempfile::TempDir;

    pub(crate) fn sample_tasks() -> Vec<TaskRecord> {
        let task = |id, category, lines, min, max| {
            TaskRecord::new(id, category, lines, ValueRange::new(min, max).unwrap())
        };

        vec![
            task(1, IssueCategory::BugDetection, 92, 10, 15),
            task(2, IssueCategory::BugDetection, 168, 15, 20),
            task(3, IssueCategory::Security, 172, 15, 20),
            task(4, IssueCategory::Performance, 204, 20, 25),
            task(6, IssueCategory::Testing, 444, 30, 45),
        ]
    }

    pub(crate) fn sample_annotations() -> AnnotationMap {
        let annotation = |issues: (f64, f64), rate: (f64, f64)| CategoryAnnotation {
            issues_per_task: ValueRange::new(issues.0, issues.1).unwrap(),
            detection_rate: ValueRange::new(rate.0, rate.1).unwrap(),
        };

        let mut map = AnnotationMap::new();
        map.insert(IssueCategory::BugDetection, annotation((4.0, 5.0), (70.0, 85.0)));
        map.insert(IssueCategory::Security, annotation((3.0, 4.0), (55.0, 70.0)));
        map.insert(IssueCategory::Performance, annotation((3.0, 5.0), (40.0, 60.0)));
        map.insert(IssueCategory::Testing, annotation((5.0, 8.0), (35.0, 50.0)));
        map
    }

    pub(crate) fn sample_report() -> ReviewReport {
        let tasks = sample_tasks();
        let summary = MetricsAggregator::new()
            .aggregate(&tasks, &sample_annotations())
            .unwrap();

        ReviewReport {
            title: "Code Review Task Analysis".to_string(),
            generated_at: "2026-01-19T00:00:00Z".to_string(),
            source: "manifest.toml".to_string(),
            summary,
            tasks,
        }
    }

    #[test]
    fn test_report_sorts_tasks() {
        let mut tasks = sample_tasks();
        tasks.reverse();
        let summary = sample_report().summary;

        let report = ReviewReport::new("t", "s", summary, tasks);
        let ids: Vec<u32> = report.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn test_generate_all_without_charts() {
        let temp = TempDir::new().unwrap();
        let written = ReportGenerator::new()
            .generate_all(&sample_report(), temp.path(), false)
            .unwrap();

        assert_eq!(written.len(), 2);
        assert!(temp.path().join("summary.json").exists());
        assert!(temp.path().join("summary.md").exists());
        assert!(!temp.path().join("complexity.png").exists());
    }
}

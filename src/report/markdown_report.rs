//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::metrics::{AggregateSummary, ComplexityBucket};
use crate::report::ReviewReport;
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Render a report as Markdown text
    fn render(&self, report: &ReviewReport) -> String;

    /// @ai:intent Generate Markdown report file
    fn generate(&self, report: &ReviewReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from aggregated summaries
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Format a percentage with one decimal
    /// @ai:effects pure
    fn format_percentage(value: f64) -> String {
        format!("{:.1}%", value)
    }

    /// @ai:intent Generate header section
    /// @ai:effects pure
    fn generate_header(report: &ReviewReport) -> String {
        let mut output = String::new();

        writeln!(output, "# {}", report.title).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Generated:** {}", report.generated_at).unwrap();
        writeln!(output, "**Source:** {}", report.source).unwrap();
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Generate overall totals section
    /// @ai:effects pure
    fn generate_overview(summary: &AggregateSummary) -> String {
        let mut output = String::new();

        writeln!(output, "## Overview").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "- **Total tasks:** {}", summary.total_tasks).unwrap();
        writeln!(
            output,
            "- **Estimated review time:** {} minutes",
            summary.total_review_minutes
        )
        .unwrap();
        writeln!(output, "- **Categories:** {}", summary.categories.len()).unwrap();
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Generate complexity distribution table
    /// @ai:effects pure
    fn generate_complexity_section(summary: &AggregateSummary) -> String {
        let mut output = String::new();

        writeln!(output, "## Complexity Distribution").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "| Complexity | Lines | Tasks | Percentage | Review Time (min) |"
        )
        .unwrap();
        writeln!(
            output,
            "|------------|-------|-------|------------|-------------------|"
        )
        .unwrap();

        for bucket in &summary.buckets {
            writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                bucket.bucket.label(),
                bucket.bucket.line_range(),
                bucket.count,
                Self::format_percentage(bucket.percentage),
                bucket.review_minutes
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Generate per-category detection rate table
    /// @ai:effects pure
    fn generate_category_section(summary: &AggregateSummary) -> String {
        let mut output = String::new();

        writeln!(output, "## Detection Rates by Category").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "| Category | Tasks | Issues per Task | Detection Rate | Declared Issues |"
        )
        .unwrap();
        writeln!(
            output,
            "|----------|-------|-----------------|----------------|-----------------|"
        )
        .unwrap();

        for cat in &summary.categories {
            let declared = cat
                .declared_issues
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());

            writeln!(
                output,
                "| {} | {} | {:.1} | {:.1}% | {} |",
                cat.category.display_name(),
                cat.count,
                cat.issues_per_task,
                cat.detection_rate,
                declared
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Generate one task table per non-empty bucket
    /// @ai:effects pure
    fn generate_task_sections(report: &ReviewReport) -> String {
        let mut output = String::new();

        for bucket in ComplexityBucket::ALL {
            let tasks: Vec<_> = report
                .tasks
                .iter()
                .filter(|t| ComplexityBucket::for_line_count(t.line_count) == bucket)
                .collect();

            if tasks.is_empty() {
                continue;
            }

            writeln!(
                output,
                "## {} Complexity Tasks ({} lines)",
                bucket.label(),
                bucket.line_range()
            )
            .unwrap();
            writeln!(output).unwrap();
            writeln!(output, "| Task | Category | Lines | Est. Time (min) |").unwrap();
            writeln!(output, "|------|----------|-------|-----------------|").unwrap();

            for task in tasks {
                writeln!(
                    output,
                    "| {:02} | {} | {} | {} |",
                    task.id,
                    task.category.display_name(),
                    task.line_count,
                    task.review_minutes
                )
                .unwrap();
            }

            writeln!(output).unwrap();
        }

        output
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Render the full Markdown document
    /// @ai:effects pure
    fn render(&self, report: &ReviewReport) -> String {
        let mut content = String::new();

        content.push_str(&Self::generate_header(report));
        content.push_str(&Self::generate_overview(&report.summary));
        content.push_str(&Self::generate_complexity_section(&report.summary));
        content.push_str(&Self::generate_category_section(&report.summary));
        content.push_str(&Self::generate_task_sections(report));

        content
    }

    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &ReviewReport, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render(report))?;
        Ok(())
    }
}

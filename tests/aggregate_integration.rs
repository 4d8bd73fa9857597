use pretty_assertions::assert_eq;
use review_metrics::config::EstimationConfig;
use review_metrics::metrics::MetricsAggregatorTrait;
use review_metrics::{
    AggregateError, ComplexityBucket, IssueCategory, Manifest, ManifestLoader, MetricsAggregator,
    ReportGenerator, ReviewReport, TaskScanner,
};
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[task]]
id = 1
category = "bug_detection"
line_count = 92
review_minutes = [10, 15]

[[task]]
id = 2
category = "bug_detection"
line_count = 168
review_minutes = [15, 20]

[[task]]
id = 3
category = "security"
line_count = 172
review_minutes = [15, 20]

[[task]]
id = 4
category = "performance"
line_count = 204
review_minutes = [20, 25]

[[task]]
id = 5
category = "maintainability"
line_count = 292
review_minutes = [20, 30]

[annotations.bug_detection]
issues_per_task = [4.0, 5.0]
detection_rate = [70.0, 85.0]

[annotations.security]
issues_per_task = [3.0, 4.0]
detection_rate = [55.0, 70.0]

[annotations.performance]
issues_per_task = [3.0, 5.0]
detection_rate = [40.0, 60.0]

[annotations.maintainability]
issues_per_task = [4.0, 6.0]
detection_rate = [45.0, 65.0]
"#;

fn write_manifest(dir: &Path, content: &str) -> Manifest {
    let path = dir.join("manifest.toml");
    std::fs::write(&path, content).unwrap();
    ManifestLoader::new().load(&path).unwrap()
}

/// A sample in the corpus layout: docstring header listing the issues.
fn sample_source(issues: usize, total_newlines: usize) -> String {
    let mut source = String::from("#!/usr/bin/env python3\n\"\"\"\nTask header\n\n");
    for i in 1..=issues {
        source.push_str(&format!("{}. Issue number {}\n", i, i));
    }
    source.push_str("\"\"\"\n");

    let used = source.matches('\n').count();
    for _ in used..total_newlines {
        source.push_str("pass\n");
    }
    source
}

#[test]
fn manifest_to_reports() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), MANIFEST);

    let summary = MetricsAggregator::new()
        .aggregate(&manifest.tasks, &manifest.annotations)
        .unwrap();

    let counts: Vec<u32> = summary.buckets.iter().map(|b| b.count).collect();
    let percentages: Vec<f64> = summary.buckets.iter().map(|b| b.percentage).collect();
    assert_eq!(counts, vec![3, 2, 0]);
    assert_eq!(percentages, vec![60.0, 40.0, 0.0]);

    let report = ReviewReport::new("Study", "manifest.toml", summary, manifest.tasks);
    let out = temp.path().join("reports");
    let written = ReportGenerator::new()
        .generate_all(&report, &out, false)
        .unwrap();

    assert_eq!(written.len(), 2);
    let markdown = std::fs::read_to_string(out.join("summary.md")).unwrap();
    assert!(markdown.contains("| Low | 0-200 | 3 | 60.0% | 40-55 |"));
    assert!(markdown.contains("| Medium | 201-400 | 2 | 40.0% | 40-55 |"));
    assert!(markdown.contains("| High | 401+ | 0 | 0.0% | 0 |"));
    assert!(!markdown.contains("## High Complexity Tasks"));
}

#[test]
fn manifest_with_unannotated_category_fails() {
    let temp = TempDir::new().unwrap();
    let maintainability = concat!(
        "[annotations.maintainability]\n",
        "issues_per_task = [4.0, 6.0]\n",
        "detection_rate = [45.0, 65.0]\n",
    );
    let content = MANIFEST.replace(maintainability, "");
    let manifest = write_manifest(temp.path(), &content);

    let err = MetricsAggregator::new()
        .aggregate(&manifest.tasks, &manifest.annotations)
        .unwrap_err();
    assert_eq!(
        err,
        AggregateError::MissingAnnotation {
            category: IssueCategory::Maintainability
        }
    );
}

#[test]
fn scanned_directory_aggregates_with_annotations() {
    let temp = TempDir::new().unwrap();
    let tasks_dir = temp.path().join("tasks");
    std::fs::create_dir_all(&tasks_dir).unwrap();

    std::fs::write(tasks_dir.join("Task_01_BugDetection.py"), sample_source(5, 91)).unwrap();
    std::fs::write(tasks_dir.join("Task_04_Performance.py"), sample_source(4, 203)).unwrap();
    std::fs::write(tasks_dir.join("Task_06_Testability.py"), sample_source(6, 443)).unwrap();

    let tasks = TaskScanner::new()
        .scan(&tasks_dir, &EstimationConfig::default())
        .unwrap();

    let lines: Vec<u32> = tasks.iter().map(|t| t.line_count).collect();
    assert_eq!(lines, vec![92, 204, 444]);

    let declared: Vec<Option<u32>> = tasks.iter().map(|t| t.declared_issues).collect();
    assert_eq!(declared, vec![Some(5), Some(4), Some(6)]);
    assert_eq!(tasks[2].category, IssueCategory::Testing);

    let mut annotations = write_manifest(temp.path(), MANIFEST).annotations;
    let performance = annotations[&IssueCategory::Performance];
    annotations.insert(IssueCategory::Testing, performance);

    let aggregator = MetricsAggregator::new();
    let summary = aggregator.aggregate(&tasks, &annotations).unwrap();

    assert_eq!(aggregator.classify(&tasks[2]), ComplexityBucket::High);
    let counts: Vec<u32> = summary.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 1, 1]);

    let percentages: f64 = summary.buckets.iter().map(|b| b.percentage).sum();
    assert!((percentages - 100.0).abs() <= 0.1 + 1e-9);

    let bugs = summary.category(IssueCategory::BugDetection).unwrap();
    assert_eq!(bugs.declared_issues, Some(5));
}

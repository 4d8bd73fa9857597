//! @ai:module:intent CLI for review metrics aggregation
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use review_metrics::{
    config::{FilterConfig, ReportConfig},
    corpus::{IssueCategory, Manifest, ManifestLoader, TaskScanner},
    metrics::{ComplexityBucket, MetricsAggregator, MetricsAggregatorTrait},
    report::{ReportGenerator, ReviewReport},
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "review-metrics")]
#[command(about = "Aggregate code-review task metrics into summary reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate one or more manifests and write reports
    Aggregate {
        /// Manifest files; several are aggregated in parallel
        #[arg(short, long)]
        manifest: Vec<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter by categories (comma-separated)
        #[arg(long)]
        categories: Option<String>,

        /// Filter by complexity buckets (comma-separated: low,medium,high)
        #[arg(long)]
        buckets: Option<String>,

        /// Filter by task IDs (comma-separated)
        #[arg(long)]
        tasks: Option<String>,

        /// Output directory for reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip PNG chart generation
        #[arg(long)]
        no_charts: bool,
    },

    /// Build a manifest from a directory of task sample files
    Scan {
        /// Directory containing Task_<NN>_<Category> files
        #[arg(short, long)]
        tasks_dir: Option<PathBuf>,

        /// Existing manifest to copy category annotations from
        #[arg(short, long)]
        annotations: Option<PathBuf>,

        /// Output manifest path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List tasks in a manifest with their complexity
    List {
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Check that a manifest can be aggregated
    Validate {
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "review-metrics.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("review_metrics=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            manifest,
            config,
            categories,
            buckets,
            tasks,
            output,
            no_charts,
        } => {
            run_aggregate(AggregateArgs {
                manifests: manifest,
                config,
                categories,
                buckets,
                tasks,
                output,
                no_charts,
            })
            .await
        }
        Commands::Scan {
            tasks_dir,
            annotations,
            output,
            config,
        } => scan_tasks(tasks_dir, annotations, output, config),
        Commands::List { manifest } => list_tasks(manifest),
        Commands::Validate { manifest } => validate(manifest),
        Commands::Init { output } => init_config(output),
    }
}

struct AggregateArgs {
    manifests: Vec<PathBuf>,
    config: Option<PathBuf>,
    categories: Option<String>,
    buckets: Option<String>,
    tasks: Option<String>,
    output: Option<PathBuf>,
    no_charts: bool,
}

/// @ai:intent Aggregate every requested manifest on blocking workers
/// @ai:effects fs:read, fs:write
async fn run_aggregate(args: AggregateArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    let cli_filter = build_filter(args.categories, args.buckets, args.tasks)?;
    if !cli_filter.is_empty() {
        config.filter = cli_filter;
    }
    config.filter.validate()?;

    let manifests = if args.manifests.is_empty() {
        vec![config.paths.manifest.clone()]
    } else {
        args.manifests
    };

    let output_root = args.output.unwrap_or_else(|| config.paths.output_dir.clone());
    let with_charts = config.report.charts && !args.no_charts;
    let output_dirs = output_dirs(&manifests, &output_root);
    let config = Arc::new(config);

    let mut handles = Vec::with_capacity(manifests.len());

    for (manifest_path, output_dir) in manifests.into_iter().zip(output_dirs) {
        let config = Arc::clone(&config);

        handles.push(tokio::task::spawn_blocking(move || {
            aggregate_manifest(&manifest_path, &output_dir, &config, with_charts)
        }));
    }

    let total = handles.len();
    let mut failures = 0;

    for handle in handles {
        match handle.await? {
            Ok(report) => print_summary(&report),
            Err(e) => {
                tracing::error!("{:#}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} manifests failed to aggregate", failures, total);
    }

    Ok(())
}

/// @ai:intent Load, filter, aggregate and render a single manifest
/// @ai:effects fs:read, fs:write
fn aggregate_manifest(
    manifest_path: &Path,
    output_dir: &Path,
    config: &ReportConfig,
    with_charts: bool,
) -> Result<ReviewReport> {
    let manifest = ManifestLoader::new().load(manifest_path)?;
    let aggregator = MetricsAggregator::new();

    let tasks: Vec<_> = manifest
        .tasks
        .into_iter()
        .filter(|task| {
            config.filter.matches(
                task.category.as_str(),
                aggregator.classify(task).as_str(),
                task.id,
            )
        })
        .collect();

    tracing::info!(
        "Aggregating {} tasks from {}",
        tasks.len(),
        manifest_path.display()
    );

    let summary = aggregator
        .aggregate(&tasks, &manifest.annotations)
        .with_context(|| format!("Failed to aggregate {}", manifest_path.display()))?;

    let report = ReviewReport::new(
        config.report.title.clone(),
        manifest_path.display().to_string(),
        summary,
        tasks,
    );

    ReportGenerator::new().generate_all(&report, output_dir, with_charts)?;
    Ok(report)
}

/// @ai:intent Scan a sample directory into a manifest file
/// @ai:effects fs:read, fs:write
fn scan_tasks(
    tasks_dir: Option<PathBuf>,
    annotations: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_or_default_config(config_path)?;
    let tasks_dir = tasks_dir.unwrap_or_else(|| config.paths.tasks_dir.clone());
    let output = output.unwrap_or_else(|| config.paths.manifest.clone());

    let loader = ManifestLoader::new();
    let tasks = TaskScanner::new().scan(&tasks_dir, &config.estimation)?;

    let annotations = match annotations {
        Some(path) => loader.load(&path)?.annotations,
        None => Default::default(),
    };

    if annotations.is_empty() {
        tracing::warn!("Manifest has no category annotations; add them before aggregating");
    }

    let manifest = Manifest { tasks, annotations };
    loader.save(&manifest, &output)?;

    println!(
        "Wrote {} tasks to {}",
        manifest.tasks.len(),
        output.display()
    );
    Ok(())
}

/// @ai:intent List tasks in a manifest
/// @ai:effects fs:read
fn list_tasks(manifest: Option<PathBuf>) -> Result<()> {
    let path = resolve_manifest(manifest)?;
    let manifest = ManifestLoader::new().load(&path)?;
    let aggregator = MetricsAggregator::new();

    println!("Tasks in {} ({}):", path.display(), manifest.tasks.len());
    println!();
    println!(
        "{:<6} {:<20} {:>8} {:<10} {:>12}",
        "ID", "Category", "Lines", "Bucket", "Minutes"
    );
    println!("{}", "-".repeat(60));

    for task in &manifest.tasks {
        println!(
            "{:<6} {:<20} {:>8} {:<10} {:>12}",
            task.id,
            task.category.display_name(),
            task.line_count,
            aggregator.classify(task).label(),
            task.review_minutes.to_string()
        );
    }

    Ok(())
}

/// @ai:intent Validate a manifest can be aggregated
/// @ai:effects fs:read
fn validate(manifest: Option<PathBuf>) -> Result<()> {
    let path = resolve_manifest(manifest)?;
    let manifest = ManifestLoader::new().load(&path)?;

    let summary = MetricsAggregator::new()
        .aggregate(&manifest.tasks, &manifest.annotations)
        .with_context(|| format!("Validation failed for {}", path.display()))?;

    println!("Manifest validation passed!");
    println!("Total tasks: {}", summary.total_tasks);
    println!("Categories: {}", summary.categories.len());

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = ReportConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<ReportConfig> {
    match path {
        Some(p) => ReportConfig::load(&p),
        None => {
            let default_path = PathBuf::from("review-metrics.toml");

            if default_path.exists() {
                ReportConfig::load(&default_path)
            } else {
                Ok(ReportConfig::default())
            }
        }
    }
}

/// @ai:intent Use the given manifest or the configured one
/// @ai:effects fs:read
fn resolve_manifest(manifest: Option<PathBuf>) -> Result<PathBuf> {
    match manifest {
        Some(p) => Ok(p),
        None => Ok(load_or_default_config(None)?.paths.manifest),
    }
}

/// @ai:intent Build filter from CLI arguments
/// @ai:effects pure
fn build_filter(
    categories: Option<String>,
    buckets: Option<String>,
    tasks: Option<String>,
) -> Result<FilterConfig> {
    let split = |s: String| -> Vec<String> {
        s.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    };

    let categories = categories
        .map(|s| {
            split(s)
                .iter()
                .map(|label| {
                    IssueCategory::from_label(label)
                        .map(|c| c.as_str().to_string())
                        .with_context(|| format!("Unknown category: {}", label))
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    let task_ids = tasks
        .map(|s| {
            split(s)
                .iter()
                .map(|id| id.parse::<u32>().with_context(|| format!("Invalid task id: {}", id)))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    Ok(FilterConfig {
        categories,
        buckets: buckets.map(split),
        task_ids,
    })
}

/// @ai:intent Name an output subdirectory after a manifest file
/// @ai:effects pure
fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string())
}

/// @ai:intent Pick one distinct output directory per manifest
/// @ai:effects pure
///
/// A single manifest writes straight into `root`. Several manifests get a
/// subdirectory each, named after the file stem; repeated stems are
/// suffixed `-1`, `-2`, ... in argument order.
fn output_dirs(manifests: &[PathBuf], root: &Path) -> Vec<PathBuf> {
    if manifests.len() <= 1 {
        return vec![root.to_path_buf(); manifests.len()];
    }

    let names: Vec<String> = manifests.iter().map(|m| dataset_name(m)).collect();
    let mut stem_counts: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *stem_counts.entry(name.as_str()).or_default() += 1;
    }

    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<&str, usize> = HashMap::new();

    names
        .iter()
        .map(|name| {
            let mut candidate = name.clone();
            if stem_counts[name.as_str()] > 1 || taken.contains(&candidate) {
                loop {
                    let suffix = next_suffix.entry(name.as_str()).or_insert(0);
                    *suffix += 1;
                    candidate = format!("{}-{}", name, suffix);
                    if !taken.contains(&candidate) {
                        break;
                    }
                }
            }
            taken.insert(candidate.clone());
            root.join(candidate)
        })
        .collect()
}

/// @ai:intent Print summary to console
/// @ai:effects io
fn print_summary(report: &ReviewReport) {
    let summary = &report.summary;

    println!();
    println!("{} ({})", report.title, report.source);
    println!("{}", "=".repeat(60));
    println!();
    println!(
        "{:<12} {:>8} {:>12} {:>16}",
        "Complexity", "Tasks", "Share", "Minutes"
    );
    println!("{}", "-".repeat(60));

    for bucket in ComplexityBucket::ALL {
        if let Some(stats) = summary.bucket(bucket) {
            println!(
                "{:<12} {:>8} {:>11.1}% {:>16}",
                bucket.label(),
                stats.count,
                stats.percentage,
                stats.review_minutes.to_string()
            );
        }
    }

    println!("{}", "-".repeat(60));
    println!(
        "{:<12} {:>8} {:>12} {:>16}",
        "Total",
        summary.total_tasks,
        "",
        summary.total_review_minutes.to_string()
    );
    println!();
}

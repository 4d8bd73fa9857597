//! @ai:module:intent Statistical aggregation for review task metrics
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, MetricsAggregatorTrait, round_percentage
//! @ai:module:stateless true

use crate::corpus::{AnnotationMap, TaskRecord, ValueRange};
use crate::error::{AggregateError, Result};
use crate::metrics::types::{AggregateSummary, BucketStats, CategoryStats, ComplexityBucket};
use std::collections::HashSet;

/// @ai:intent Trait for metrics aggregation
pub trait MetricsAggregatorTrait: Send + Sync {
    /// @ai:intent Classify a task into a complexity bucket
    fn classify(&self, task: &TaskRecord) -> ComplexityBucket;

    /// @ai:intent Aggregate task records into a summary
    fn aggregate(
        &self,
        tasks: &[TaskRecord],
        annotations: &AnnotationMap,
    ) -> Result<AggregateSummary>;
}

/// @ai:intent Aggregates task records into statistical summaries
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// @ai:intent Create a new metrics aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Reject input that cannot be aggregated
    /// @ai:post Ok means non-empty, unique ids, every category annotated
    /// @ai:effects pure
    fn validate(tasks: &[TaskRecord], annotations: &AnnotationMap) -> Result<()> {
        if tasks.is_empty() {
            return Err(AggregateError::EmptyInput);
        }

        let mut seen = HashSet::with_capacity(tasks.len());
        for task in tasks {
            if !seen.insert(task.id) {
                return Err(AggregateError::DuplicateId { id: task.id });
            }
        }

        if let Some(task) = tasks
            .iter()
            .find(|t| !annotations.contains_key(&t.category))
        {
            return Err(AggregateError::MissingAnnotation {
                category: task.category,
            });
        }

        Ok(())
    }

    /// @ai:intent Calculate stats for each bucket, empty buckets included
    /// @ai:effects pure
    fn aggregate_by_bucket(tasks: &[TaskRecord]) -> Vec<BucketStats> {
        let total = tasks.len();

        ComplexityBucket::ALL
            .iter()
            .map(|bucket| {
                let members: Vec<_> = tasks
                    .iter()
                    .filter(|t| ComplexityBucket::for_line_count(t.line_count) == *bucket)
                    .collect();

                let mut task_ids: Vec<u32> = members.iter().map(|t| t.id).collect();
                task_ids.sort_unstable();

                BucketStats {
                    bucket: *bucket,
                    count: members.len() as u32,
                    percentage: percentage_of(members.len(), total),
                    review_minutes: ValueRange::sum_of(members.iter().map(|t| &t.review_minutes)),
                    task_ids,
                }
            })
            .collect()
    }

    /// @ai:intent Calculate stats for each category present in the input
    /// @ai:pre every task category has an annotation
    /// @ai:effects pure
    fn aggregate_by_category(
        tasks: &[TaskRecord],
        annotations: &AnnotationMap,
    ) -> Vec<CategoryStats> {
        let total = tasks.len();

        annotations
            .iter()
            .filter_map(|(category, annotation)| {
                let members: Vec<_> = tasks.iter().filter(|t| t.category == *category).collect();

                if members.is_empty() {
                    return None;
                }

                let declared: Vec<u64> = members
                    .iter()
                    .filter_map(|t| t.declared_issues.map(u64::from))
                    .collect();
                let declared_issues = (!declared.is_empty()).then(|| declared.iter().sum());

                Some(CategoryStats {
                    category: *category,
                    count: members.len() as u32,
                    percentage: percentage_of(members.len(), total),
                    issues_per_task: annotation.issues_per_task,
                    detection_rate: annotation.detection_rate,
                    review_minutes: ValueRange::sum_of(members.iter().map(|t| &t.review_minutes)),
                    declared_issues,
                })
            })
            .collect()
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Round to one decimal place, halves away from zero
/// @ai:effects pure
pub fn round_percentage(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_percentage(count as f64 * 100.0 / total as f64)
}

impl MetricsAggregatorTrait for MetricsAggregator {
    /// @ai:intent Classify a task by its line count
    /// @ai:effects pure
    fn classify(&self, task: &TaskRecord) -> ComplexityBucket {
        ComplexityBucket::for_line_count(task.line_count)
    }

    /// @ai:intent Validate, then aggregate tasks into a summary
    /// @ai:effects pure
    fn aggregate(
        &self,
        tasks: &[TaskRecord],
        annotations: &AnnotationMap,
    ) -> Result<AggregateSummary> {
        Self::validate(tasks, annotations)?;

        let buckets = Self::aggregate_by_bucket(tasks);
        let categories = Self::aggregate_by_category(tasks, annotations);

        tracing::debug!(
            "Aggregated {} tasks into {} categories",
            tasks.len(),
            categories.len()
        );

        Ok(AggregateSummary {
            total_tasks: tasks.len() as u32,
            total_review_minutes: ValueRange::sum_of(tasks.iter().map(|t| &t.review_minutes)),
            buckets,
            categories,
        })
    }
}

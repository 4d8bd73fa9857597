//! @ai:module:intent Metric types for review task summaries
//! @ai:module:layer domain
//! @ai:module:public_api ComplexityBucket, BucketStats, CategoryStats, AggregateSummary
//! @ai:module:stateless true

use crate::corpus::{IssueCategory, ValueRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper line bound (inclusive) of the Low bucket.
pub const LOW_MAX_LINES: u32 = 200;
/// Lower line bound (inclusive) of the Medium bucket.
pub const MEDIUM_MIN_LINES: u32 = LOW_MAX_LINES + 1;
/// Upper line bound (inclusive) of the Medium bucket.
pub const MEDIUM_MAX_LINES: u32 = 400;

/// @ai:intent Complexity classification of a task by line count
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityBucket {
    Low,
    Medium,
    High,
}

impl ComplexityBucket {
    pub const ALL: [ComplexityBucket; 3] = [
        ComplexityBucket::Low,
        ComplexityBucket::Medium,
        ComplexityBucket::High,
    ];

    /// @ai:intent Classify a line count: Low <= 200 < Medium <= 400 < High
    /// @ai:effects pure
    pub fn for_line_count(line_count: u32) -> Self {
        match line_count {
            0..=LOW_MAX_LINES => ComplexityBucket::Low,
            MEDIUM_MIN_LINES..=MEDIUM_MAX_LINES => ComplexityBucket::Medium,
            _ => ComplexityBucket::High,
        }
    }

    /// @ai:intent Convert bucket to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityBucket::Low => "low",
            ComplexityBucket::Medium => "medium",
            ComplexityBucket::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplexityBucket::Low => "Low",
            ComplexityBucket::Medium => "Medium",
            ComplexityBucket::High => "High",
        }
    }

    /// @ai:intent Human-readable line range of the bucket
    /// @ai:effects pure
    pub fn line_range(&self) -> String {
        match self {
            ComplexityBucket::Low => format!("0-{}", LOW_MAX_LINES),
            ComplexityBucket::Medium => format!("{}-{}", MEDIUM_MIN_LINES, MEDIUM_MAX_LINES),
            ComplexityBucket::High => format!("{}+", MEDIUM_MAX_LINES + 1),
        }
    }
}

impl fmt::Display for ComplexityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Aggregates for one complexity bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub bucket: ComplexityBucket,
    pub count: u32,
    /// Share of all tasks, one decimal place
    pub percentage: f64,
    pub review_minutes: ValueRange<u64>,
    pub task_ids: Vec<u32>,
}

/// @ai:intent Aggregates for one issue category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: IssueCategory,
    pub count: u32,
    pub percentage: f64,
    pub issues_per_task: ValueRange<f64>,
    pub detection_rate: ValueRange<f64>,
    pub review_minutes: ValueRange<u64>,
    /// Sum over tasks that declare an issue count
    pub declared_issues: Option<u64>,
}

/// @ai:intent Complete derived statistics for a task set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_tasks: u32,
    pub total_review_minutes: ValueRange<u64>,
    /// Always Low, Medium, High in that order
    pub buckets: Vec<BucketStats>,
    /// Categories present in the input, in declaration order
    pub categories: Vec<CategoryStats>,
}

impl AggregateSummary {
    /// @ai:intent Look up the stats of one bucket
    /// @ai:effects pure
    pub fn bucket(&self, bucket: ComplexityBucket) -> Option<&BucketStats> {
        self.buckets.iter().find(|b| b.bucket == bucket)
    }

    pub fn category(&self, category: IssueCategory) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| c.category == category)
    }
}

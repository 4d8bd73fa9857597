//! @ai:module:intent Externally supplied per-category detection annotations
//! @ai:module:layer domain
//! @ai:module:public_api CategoryAnnotation, AnnotationMap
//! @ai:module:stateless true

use crate::corpus::task::{IssueCategory, ValueRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Issue and detection estimates for one category, taken as given
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnnotation {
    pub issues_per_task: ValueRange<f64>,
    /// Percent of issues reviewers are expected to find
    pub detection_rate: ValueRange<f64>,
}

/// Ordered so that aggregation and rendering are stable across runs.
pub type AnnotationMap = BTreeMap<IssueCategory, CategoryAnnotation>;

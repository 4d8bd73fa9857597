//! @ai:module:intent Review metrics aggregation and reporting library
//! @ai:module:layer application
//! @ai:module:public_api config, corpus, error, metrics, report

pub mod config;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod report;

pub use config::ReportConfig;
pub use corpus::{
    AnnotationMap, CategoryAnnotation, IssueCategory, Manifest, ManifestLoader, TaskRecord,
    TaskScanner, ValueRange,
};
pub use error::AggregateError;
pub use metrics::{AggregateSummary, ComplexityBucket, MetricsAggregator, MetricsAggregatorTrait};
pub use report::{ReportGenerator, ReviewReport};

//! @ai:module:intent Complexity classification and metrics aggregation
//! @ai:module:layer application
//! @ai:module:public_api ComplexityBucket, BucketStats, CategoryStats, AggregateSummary, MetricsAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{round_percentage, MetricsAggregator, MetricsAggregatorTrait};
pub use types::{AggregateSummary, BucketStats, CategoryStats, ComplexityBucket};

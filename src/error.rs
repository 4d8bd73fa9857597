//! @ai:module:intent Error types for metrics aggregation
//! @ai:module:layer domain
//! @ai:module:public_api AggregateError, Result
//! @ai:module:stateless true

use crate::corpus::IssueCategory;
use thiserror::Error;

/// @ai:intent Input validation failures raised before any aggregation work
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("no tasks supplied")]
    EmptyInput,

    #[error("duplicate task id: {id}")]
    DuplicateId { id: u32 },

    #[error("no detection-rate annotation for category {category}")]
    MissingAnnotation { category: IssueCategory },

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: String, max: String },
}

pub type Result<T> = std::result::Result<T, AggregateError>;

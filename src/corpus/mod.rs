//! @ai:module:intent Task corpus definitions and loading
//! @ai:module:layer domain
//! @ai:module:public_api TaskRecord, IssueCategory, ValueRange, CategoryAnnotation, ManifestLoader, TaskScanner

pub mod annotation;
pub mod loader;
pub mod task;

pub use annotation::{AnnotationMap, CategoryAnnotation};
pub use loader::{Manifest, ManifestLoader, TaskScanner};
pub use task::{IssueCategory, TaskRecord, ValueRange};

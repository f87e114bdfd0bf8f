//! Course catalog and local project lookup
//!
//! The notifier only needs two questions answered: which exercises does the
//! current course have, and which of them exist (and are open) locally.

pub mod catalog;
pub mod snapshot;

pub use catalog::{ExerciseCatalog, ProjectHandle, ProjectResolver};
pub use snapshot::CourseSnapshot;

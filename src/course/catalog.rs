//! Collaborator traits for course and project lookup.

use std::path::PathBuf;

use crate::domain::Exercise;

/// A downloaded exercise's project on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectHandle {
    pub exercise: String,
    pub path: PathBuf,
}

/// Read-only view of the selected course.
pub trait ExerciseCatalog: Send + Sync {
    /// Exercises of the current course, in catalog order
    fn current_course_exercises(&self) -> Vec<Exercise>;
}

/// Maps exercises to local projects.
pub trait ProjectResolver: Send + Sync {
    /// The exercise's project, or `None` if it was never downloaded
    fn project_for(&self, exercise: &Exercise) -> Option<ProjectHandle>;

    /// Whether the project is currently open in the workspace
    fn is_open(&self, project: &ProjectHandle) -> bool;
}

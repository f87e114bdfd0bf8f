//! In-memory course snapshot.
//!
//! Implements both [`ExerciseCatalog`] and [`ProjectResolver`] from a YAML
//! description of a course and the state of its local projects.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;

use crate::course::catalog::{ExerciseCatalog, ProjectHandle, ProjectResolver};
use crate::domain::Exercise;
use crate::error::{Result, TmcError};

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    course: String,
    #[serde(default = "default_project_dir")]
    project_dir: PathBuf,
    #[serde(default)]
    exercises: Vec<SnapshotEntry>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    #[serde(flatten)]
    exercise: Exercise,
    #[serde(default)]
    downloaded: bool,
    #[serde(default)]
    open: bool,
}

#[derive(Debug, Default)]
struct SnapshotState {
    exercises: Vec<Exercise>,
    downloaded: HashSet<String>,
    open: HashSet<String>,
}

/// A course and its local projects, mutable in place.
#[derive(Debug)]
pub struct CourseSnapshot {
    course: String,
    project_dir: PathBuf,
    state: RwLock<SnapshotState>,
}

impl CourseSnapshot {
    /// Empty snapshot for `course` with projects under `project_dir/course/`
    pub fn new(course: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            course: course.into(),
            project_dir: project_dir.into(),
            state: RwLock::new(SnapshotState::default()),
        }
    }

    /// Add an exercise (builder pattern). An open project implies a download.
    pub fn with_exercise(self, exercise: Exercise, downloaded: bool, open: bool) -> Self {
        {
            let mut state = self.write();
            if downloaded || open {
                state.downloaded.insert(exercise.name.clone());
            }
            if open {
                state.open.insert(exercise.name.clone());
            }
            state.exercises.push(exercise);
        }
        self
    }

    /// Parse a snapshot from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_yaml::from_str(content)?;
        if file.course.trim().is_empty() {
            return Err(TmcError::InvalidInput("course name is empty".to_string()));
        }

        let mut snapshot = Self::new(file.course, file.project_dir);
        let mut seen = HashSet::new();
        for entry in file.exercises {
            if !seen.insert(entry.exercise.name.clone()) {
                return Err(TmcError::InvalidInput(format!(
                    "duplicate exercise: {}",
                    entry.exercise.name
                )));
            }
            snapshot = snapshot.with_exercise(entry.exercise, entry.downloaded, entry.open);
        }
        Ok(snapshot)
    }

    /// Load a snapshot from a YAML (or JSON) file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let snapshot = Self::from_yaml_str(&content)?;
        log::info!(
            "Loaded course {} with {} exercises from {}",
            snapshot.course,
            snapshot.read().exercises.len(),
            path.as_ref().display()
        );
        Ok(snapshot)
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    /// Mark a project as downloaded. Returns false for unknown exercises.
    pub fn download(&self, name: &str) -> bool {
        let mut state = self.write();
        if !state.exercises.iter().any(|e| e.name == name) {
            return false;
        }
        state.downloaded.insert(name.to_string());
        true
    }

    /// Open a downloaded project. Returns false if it is not downloaded.
    pub fn open_project(&self, name: &str) -> bool {
        let mut state = self.write();
        if !state.downloaded.contains(name) {
            return false;
        }
        state.open.insert(name.to_string());
        true
    }

    /// Close a project. Returns false if it was not open.
    pub fn close_project(&self, name: &str) -> bool {
        self.write().open.remove(name)
    }

    /// Update an exercise's completion flag. Returns false for unknown exercises.
    pub fn set_completed(&self, name: &str, completed: bool) -> bool {
        let mut state = self.write();
        match state.exercises.iter_mut().find(|e| e.name == name) {
            Some(exercise) => {
                exercise.completed = completed;
                true
            }
            None => false,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SnapshotState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SnapshotState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ExerciseCatalog for CourseSnapshot {
    fn current_course_exercises(&self) -> Vec<Exercise> {
        self.read().exercises.clone()
    }
}

impl ProjectResolver for CourseSnapshot {
    fn project_for(&self, exercise: &Exercise) -> Option<ProjectHandle> {
        if !self.read().downloaded.contains(&exercise.name) {
            return None;
        }
        Some(ProjectHandle {
            exercise: exercise.name.clone(),
            path: self.project_dir.join(&self.course).join(&exercise.name),
        })
    }

    fn is_open(&self, project: &ProjectHandle) -> bool {
        self.read().open.contains(&project.exercise)
    }
}

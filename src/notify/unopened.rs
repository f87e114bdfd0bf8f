//! Scan for downloaded but unopened exercises.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::course::{ExerciseCatalog, ProjectResolver};
use crate::domain::Exercise;
use crate::notify::display::{Notification, NotificationAction, NotificationDisplay, Priority};
use crate::notify::readiness::ProjectReadinessSource;
use crate::notify::token::NotificationToken;

/// Icon shown next to the notification
pub const DEFAULT_ICON: &str = "smile.gif";

/// Lets the user pick which closed exercises to open.
pub trait UnopenedExercisesDialog: Send + Sync {
    fn display(&self, exercises: Vec<Exercise>);
}

/// Computes the unopened set. Cheap to clone so click handlers can own one.
#[derive(Clone)]
pub struct ExerciseScan {
    catalog: Arc<dyn ExerciseCatalog>,
    projects: Arc<dyn ProjectResolver>,
}

impl ExerciseScan {
    pub fn new(catalog: Arc<dyn ExerciseCatalog>, projects: Arc<dyn ProjectResolver>) -> Self {
        Self { catalog, projects }
    }

    /// Exercises that have a local project which is not open, in catalog order
    pub fn unopened_exercises(&self) -> Vec<Exercise> {
        self.catalog
            .current_course_exercises()
            .into_iter()
            .filter(|exercise| {
                self.projects
                    .project_for(exercise)
                    .is_some_and(|project| !self.projects.is_open(&project))
            })
            .collect()
    }
}

/// How many of `exercises` are still worth nagging about
pub fn count_actionable(exercises: &[Exercise], now: DateTime<Utc>) -> usize {
    exercises.iter().filter(|exercise| exercise.is_actionable_at(now)).count()
}

/// Message and action label for `count` actionable exercises
pub fn notification_text(count: usize) -> (String, String) {
    if count == 1 {
        (
            "There is one exercise that is downloaded but not opened.".to_string(),
            "Click here to open it.".to_string(),
        )
    } else {
        (
            format!("There are {} exercises that are downloaded but not opened.", count),
            "Click here to open them.".to_string(),
        )
    }
}

/// Raises (or replaces) the unopened exercises notification.
pub struct UnopenedExerciseNotifier {
    scan: ExerciseScan,
    display: Arc<dyn NotificationDisplay>,
    dialog: Arc<dyn UnopenedExercisesDialog>,
    readiness: Arc<dyn ProjectReadinessSource>,
    token: NotificationToken,
    icon: String,
    priority: Priority,
}

impl UnopenedExerciseNotifier {
    pub fn new(
        scan: ExerciseScan,
        display: Arc<dyn NotificationDisplay>,
        dialog: Arc<dyn UnopenedExercisesDialog>,
        readiness: Arc<dyn ProjectReadinessSource>,
        token: NotificationToken,
    ) -> Self {
        Self {
            scan,
            display,
            dialog,
            readiness,
            token,
            icon: DEFAULT_ICON.to_string(),
            priority: Priority::Low,
        }
    }

    /// Set the icon (builder pattern)
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the priority (builder pattern)
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn token(&self) -> NotificationToken {
        self.token
    }

    pub fn unopened_exercises(&self) -> Vec<Exercise> {
        self.scan.unopened_exercises()
    }

    /// Unopened exercises that are neither completed nor past deadline
    pub fn actionable_count(&self) -> usize {
        count_actionable(&self.scan.unopened_exercises(), Utc::now())
    }

    /// Run the scan once projects have finished opening.
    ///
    /// The returned receiver yields the actionable count when the scan has
    /// run. If the readiness source never fires, neither does the scan, and
    /// the receiver reports the sender as dropped.
    pub fn schedule_check(self: &Arc<Self>) -> oneshot::Receiver<usize> {
        let (tx, rx) = oneshot::channel();
        let notifier = Arc::clone(self);
        self.readiness
            .when_projects_completely_opened(Box::new(move || {
                let _ = tx.send(notifier.check_now());
            }));
        rx
    }

    /// Scan now and notify if anything is actionable.
    /// Returns the actionable count; zero means nothing was shown.
    pub fn check_now(&self) -> usize {
        let unopened = self.scan.unopened_exercises();
        let count = count_actionable(&unopened, Utc::now());
        if count == 0 {
            log::debug!(
                "No actionable unopened exercises ({} unopened in total)",
                unopened.len()
            );
            return 0;
        }

        let (message, action_label) = notification_text(count);
        log::info!("{}", message);
        self.display.notify(Notification {
            token: self.token,
            message,
            icon: self.icon.clone(),
            action_label,
            action: self.open_action(),
            priority: self.priority,
        });
        count
    }

    /// Recomputes the unopened set when clicked, not when raised
    fn open_action(&self) -> NotificationAction {
        let scan = self.scan.clone();
        let dialog = self.dialog.clone();
        Arc::new(move || dialog.display(scan.unopened_exercises()))
    }
}

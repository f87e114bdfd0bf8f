//! Unopened exercise notifications
//!
//! After the workspace finishes opening projects, scan the course for
//! exercises that are downloaded but closed and raise one low priority
//! notification offering to open them. Repeated scans replace the live
//! notification instead of stacking new ones.

pub mod display;
pub mod readiness;
pub mod token;
pub mod unopened;

pub use display::{Notification, NotificationAction, NotificationBoard, NotificationDisplay, Priority};
pub use readiness::{ProjectReadinessSource, ProjectsReadiness, ReadinessCallback};
pub use token::NotificationToken;
pub use unopened::{
    ExerciseScan, UnopenedExerciseNotifier, UnopenedExercisesDialog, count_actionable, notification_text,
};

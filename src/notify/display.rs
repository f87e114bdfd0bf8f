//! Notification display.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::notify::token::NotificationToken;

/// Runs when the user clicks the notification
pub type NotificationAction = Arc<dyn Fn() + Send + Sync>;

/// How insistently a notification is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
    Low,
    Silent,
}

/// A notification balloon with one clickable action.
#[derive(Clone)]
pub struct Notification {
    pub token: NotificationToken,
    pub message: String,
    pub icon: String,
    pub action_label: String,
    pub action: NotificationAction,
    pub priority: Priority,
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("token", &self.token)
            .field("message", &self.message)
            .field("icon", &self.icon)
            .field("action_label", &self.action_label)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Shows notifications to the user.
pub trait NotificationDisplay: Send + Sync {
    /// Show `notification`, replacing any live one with the same token
    fn notify(&self, notification: Notification);
}

/// In-memory display: at most one live notification per token.
#[derive(Default)]
pub struct NotificationBoard {
    live: Mutex<HashMap<NotificationToken, Notification>>,
    notifies: AtomicUsize,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications currently visible
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    /// The live notification for `token`
    pub fn get(&self, token: NotificationToken) -> Option<Notification> {
        self.lock().get(&token).cloned()
    }

    /// All live notifications, oldest token first
    pub fn live(&self) -> Vec<Notification> {
        let mut live: Vec<Notification> = self.lock().values().cloned().collect();
        live.sort_by_key(|n| n.token.id());
        live
    }

    /// Run the action of the live notification for `token`.
    /// Returns false if nothing is live under it.
    pub fn click(&self, token: NotificationToken) -> bool {
        let action = self.lock().get(&token).map(|n| n.action.clone());
        match action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    /// Remove the live notification for `token`
    pub fn dismiss(&self, token: NotificationToken) -> bool {
        self.lock().remove(&token).is_some()
    }

    /// How many times `notify` has been called
    pub fn total_notifies(&self) -> usize {
        self.notifies.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<NotificationToken, Notification>> {
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationDisplay for NotificationBoard {
    fn notify(&self, notification: Notification) {
        self.notifies.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.lock().insert(notification.token, notification) {
            log::debug!("Replaced notification: {}", previous.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(token: NotificationToken, message: &str, action: NotificationAction) -> Notification {
        Notification {
            token,
            message: message.to_string(),
            icon: "smile.gif".to_string(),
            action_label: "Click here".to_string(),
            action,
            priority: Priority::Low,
        }
    }

    #[test]
    fn test_same_token_replaces() {
        let board = NotificationBoard::new();
        let token = NotificationToken::new();
        board.notify(notification(token, "first", Arc::new(|| {})));
        board.notify(notification(token, "second", Arc::new(|| {})));
        assert_eq!(board.live_count(), 1);
        assert_eq!(board.total_notifies(), 2);
        assert_eq!(board.get(token).unwrap().message, "second");
    }

    #[test]
    fn test_different_tokens_stack() {
        let board = NotificationBoard::new();
        let a = NotificationToken::new();
        let b = NotificationToken::new();
        board.notify(notification(a, "a", Arc::new(|| {})));
        board.notify(notification(b, "b", Arc::new(|| {})));
        let messages: Vec<String> = board.live().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_click_runs_action() {
        let board = NotificationBoard::new();
        let token = NotificationToken::new();
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = clicks.clone();
        board.notify(notification(
            token,
            "m",
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        ));
        assert!(board.click(token));
        assert!(!board.click(NotificationToken::new()));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dismiss() {
        let board = NotificationBoard::new();
        let token = NotificationToken::new();
        board.notify(notification(token, "m", Arc::new(|| {})));
        assert!(board.dismiss(token));
        assert!(!board.dismiss(token));
        assert_eq!(board.live_count(), 0);
    }

    #[test]
    fn test_priority_serde() {
        let parsed: Priority = serde_yaml::from_str("low").unwrap();
        assert_eq!(parsed, Priority::Low);
    }
}

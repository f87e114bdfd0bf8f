//! Identity for a replaceable notification.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Addresses "the" notification of some kind.
///
/// Mint one per kind of notification at startup and hand clones to whoever
/// raises it; a display replaces whatever is live under the same token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationToken(u64);

impl NotificationToken {
    /// Mint a token distinct from every other token in the process
    pub fn new() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for NotificationToken {
    fn default() -> Self {
        Self::new()
    }
}

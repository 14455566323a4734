use std::time::{Duration, Instant};

use crate::command::ActionId;

pub const SYSTEM_ONLINE_MESSAGE: &str = "A.T.L.A.S System Online";

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

/// A toast visible in `[show_at, hide_at)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub show_at: Instant,
    pub hide_at: Instant,
}

impl Notification {
    pub fn scheduled(
        message: impl Into<String>,
        now: Instant,
        delay: Duration,
        duration: Duration,
    ) -> Self {
        let show_at = now + delay;
        Self {
            message: message.into(),
            show_at,
            hide_at: show_at + duration,
        }
    }

    pub fn system_online(now: Instant, delay: Duration, duration: Duration) -> Self {
        Self::scheduled(SYSTEM_ONLINE_MESSAGE, now, delay, duration)
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now >= self.show_at && now < self.hide_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.hide_at
    }
}

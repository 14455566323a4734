use std::time::{Duration, Instant};

use crate::registry::PageDescriptor;

pub const IDLE_TITLE: &str = "Loading A.T.L.A.S";
pub const IDLE_SUBTITLE: &str = "Initializing Defense Systems...";

/// Full-screen loading visual. Owns only its own text and visibility marker.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOverlay {
    visible: bool,
    title: String,
    subtitle: String,
    shown_at: Option<Instant>,
    expected: Duration,
}

impl Default for TransitionOverlay {
    fn default() -> Self {
        Self {
            visible: false,
            title: IDLE_TITLE.to_string(),
            subtitle: IDLE_SUBTITLE.to_string(),
            shown_at: None,
            expected: Duration::ZERO,
        }
    }
}

impl TransitionOverlay {
    /// Re-renders the text even when already visible.
    pub fn show(&mut self, descriptor: &PageDescriptor) {
        self.title = format!("Loading {}", descriptor.page_title);
        self.subtitle = descriptor.loading_subtitle.clone();
        if !self.visible {
            self.visible = true;
            self.shown_at = Some(Instant::now());
        }
    }

    /// Expected wait used for the progress bar only.
    pub fn set_expected(&mut self, expected: Duration) {
        self.expected = expected;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.shown_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn progress(&self, now: Instant) -> f64 {
        let Some(shown_at) = self.shown_at else {
            return 0.0;
        };
        if self.expected.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(shown_at);
        (elapsed.as_secs_f64() / self.expected.as_secs_f64()).clamp(0.0, 1.0)
    }
}

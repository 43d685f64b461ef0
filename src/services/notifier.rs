use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    shown_at: Instant,
}

/// Single-slot toast. Showing a message replaces whatever is displayed and
/// restarts the hide timer.
#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Option<Notification>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(NotificationKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(NotificationKind::Error, message);
    }

    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.slot = Some(Notification {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn hide(&mut self) {
        self.slot = None;
    }

    /// The toast still on screen, if its timer has not run out.
    pub fn current(&self) -> Option<&Notification> {
        self.slot
            .as_ref()
            .filter(|note| note.shown_at.elapsed() < self.ttl)
    }

    /// Time left before the current toast hides itself.
    pub fn remaining(&self) -> Option<Duration> {
        self.current()
            .map(|note| self.ttl.saturating_sub(note.shown_at.elapsed()))
    }
}

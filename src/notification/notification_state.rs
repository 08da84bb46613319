use std::time::{Duration, Instant};

const INFO_DURATION: Duration = Duration::from_millis(1500);
const WARNING_DURATION: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationType {
    /// Short confirmations such as "Signed out"
    #[default]
    Info,
    /// Invalid config, offline fallback
    Warning,
    /// Stays until dismissed with Esc
    Error,
}

impl NotificationType {
    fn lifetime(self) -> Option<Duration> {
        match self {
            NotificationType::Info => Some(INFO_DURATION),
            NotificationType::Warning => Some(WARNING_DURATION),
            NotificationType::Error => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationType,
    pub shown_at: Instant,
}

impl Notification {
    pub fn expires_at(&self) -> Option<Instant> {
        self.kind.lifetime().map(|d| self.shown_at + d)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at().is_some_and(|at| now >= at)
    }
}

/// At most one message on screen; a new one replaces the old.
#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Info);
    }

    pub fn show_warning(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Warning);
    }

    pub fn show_error(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Error);
    }

    pub fn show_with_type(&mut self, message: &str, kind: NotificationType) {
        log::debug!("notification ({:?}): {}", kind, message);
        self.current = Some(Notification {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Drop the message once its time is up. Returns true if one was
    /// dropped.
    pub fn clear_if_expired(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_expired_at(now)) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn current_message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }
}

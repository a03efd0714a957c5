use chrono::{DateTime, Duration, Utc};

/// How long a status message stays visible unless a view says otherwise.
pub const STATUS_TTL_MS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl StatusMessage {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at >= self.ttl
    }
}

/// A single transient, auto-dismissing message line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBar {
    message: Option<StatusMessage>,
}

impl StatusBar {
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>, now: DateTime<Utc>) {
        self.show_for(kind, text, now, Duration::milliseconds(STATUS_TTL_MS));
    }

    pub fn show_for(
        &mut self,
        kind: StatusKind,
        text: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) {
        self.message = Some(StatusMessage {
            kind,
            text: text.into(),
            shown_at: now,
            ttl,
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Info, text, Utc::now());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Success, text, Utc::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Error, text, Utc::now());
    }

    /// The message still visible at `now`, if any.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&StatusMessage> {
        self.message.as_ref().filter(|m| !m.is_expired(now))
    }

    /// The most recent message regardless of expiry.
    pub fn last(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_ttl() {
        let mut bar = StatusBar::default();
        let t0 = Utc::now();
        bar.show(StatusKind::Success, "Draft saved", t0);

        assert!(bar.current(t0 + Duration::milliseconds(2999)).is_some());
        assert!(bar.current(t0 + Duration::seconds(3)).is_none());
        assert_eq!(bar.last().unwrap().text, "Draft saved");
    }

    #[test]
    fn newer_message_replaces_older() {
        let mut bar = StatusBar::default();
        let t0 = Utc::now();
        bar.show(StatusKind::Info, "one", t0);
        bar.show_for(StatusKind::Error, "two", t0, Duration::seconds(1));

        let current = bar.current(t0).unwrap();
        assert_eq!(current.kind, StatusKind::Error);
        assert!(bar.current(t0 + Duration::seconds(1)).is_none());
    }
}

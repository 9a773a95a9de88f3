//! Transient status notices.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Loading,
    Error,
}

impl NoticeLevel {
    /// CSS class suffix for the status area
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Loading => "loading",
            Self::Error => "error",
        }
    }
}

/// A message for the status area; `duration` of `None` stays until replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub duration: Option<Duration>,
}

impl Notice {
    pub fn new(message: impl Into<String>, level: NoticeLevel, duration: Option<Duration>) -> Self {
        Self {
            message: message.into(),
            level,
            duration,
        }
    }

    pub fn info(message: impl Into<String>, millis: u64) -> Self {
        Self::new(message, NoticeLevel::Info, Some(Duration::from_millis(millis)))
    }

    pub fn error(message: impl Into<String>, millis: u64) -> Self {
        Self::new(message, NoticeLevel::Error, Some(Duration::from_millis(millis)))
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Loading, None)
    }
}

/// Sequence number of a shown notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

/// The status area: at most one notice at a time
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Option<(NoticeId, Notice)>,
    next_id: u64,
}

impl StatusLine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(_, notice)| notice)
    }

    /// Id and lifetime of the shown notice, if it expires
    #[must_use]
    pub fn timer(&self) -> Option<(NoticeId, Duration)> {
        self.current
            .as_ref()
            .and_then(|(id, notice)| notice.duration.map(|d| (*id, d)))
    }

    /// Show `notice`, replacing any other.
    ///
    /// Returns the id to pass to [`StatusLine::dismiss`] when its duration elapses.
    pub fn show(&mut self, notice: Notice) -> NoticeId {
        self.next_id += 1;
        let id = NoticeId(self.next_id);
        self.current = Some((id, notice));
        id
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    /// Hide the notice `id` if it is still the one shown
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        if self.current.as_ref().is_some_and(|(shown, _)| *shown == id) {
            self.current = None;
            return true;
        }
        false
    }
}

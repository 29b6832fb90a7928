use std::time::{Duration, Instant};

pub const SHORT_STATUS: Duration = Duration::from_secs(2);
pub const LONG_STATUS: Duration = Duration::from_secs(3);

/// Transient message shown at the bottom of a window.
#[derive(Debug, Default, Clone)]
pub struct StatusLine {
    message: Option<(String, Instant)>,
}

impl StatusLine {
    pub fn show(&mut self, text: impl Into<String>, duration: Duration) {
        self.message = Some((text.into(), Instant::now() + duration));
    }

    /// Current message, dropping it once it has expired.
    pub fn current(&mut self) -> Option<&str> {
        if matches!(&self.message, Some((_, until)) if Instant::now() >= *until) {
            self.message = None;
        }
        self.message.as_ref().map(|(text, _)| text.as_str())
    }

    /// Time left before the message disappears.
    pub fn remaining(&self) -> Option<Duration> {
        self.message
            .as_ref()
            .map(|(_, until)| until.saturating_duration_since(Instant::now()))
    }
}

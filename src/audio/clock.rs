use std::time::{Duration, Instant};

/// Wall-clock position tracking for one sink.
///
/// rodio does not report the play head, so position is the time accumulated
/// across previous play spans plus the current span, if any.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PlayClock {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl PlayClock {
    pub(crate) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(crate) fn stop(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st);
        }
    }

    /// Restart counting from `position`, keeping the running state.
    pub(crate) fn reset_to(&mut self, position: Duration, now: Instant) {
        self.accumulated = position;
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
    }

    pub(crate) fn position(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }
}

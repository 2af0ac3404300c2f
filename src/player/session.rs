use std::time::Duration;

/// Playback state private to one audio component.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSession {
    pub is_playing: bool,
    pub elapsed: Duration,
    /// Zero until the resource reported its metadata.
    pub duration: Duration,
}

impl PlaybackSession {
    pub fn on_metadata_loaded(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn on_time_update(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Natural end of the track: back to the start, paused. No auto-advance.
    pub fn on_ended(&mut self) {
        self.elapsed = Duration::ZERO;
        self.is_playing = false;
    }

    /// Absolute position for a click at `fraction` of the bar width.
    pub fn seek_target(&self, fraction: f64) -> Duration {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.duration.mul_f64(fraction)
    }

    /// Filled share of the progress bar in `[0, 1]`; zero while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

use std::time::Duration;

use crate::audio::AudioEvent;
use crate::catalog::{Track, TrackKind, embed_url};

use super::resource::{MediaResource, volume_for};
use super::session::PlaybackSession;

/// Local playback surface for an audio track.
pub struct AudioPanel {
    pub session: PlaybackSession,
    resource: Box<dyn MediaResource>,
}

impl AudioPanel {
    pub fn new(resource: Box<dyn MediaResource>) -> Self {
        Self {
            session: PlaybackSession::default(),
            resource,
        }
    }

    pub fn toggle_play(&mut self) {
        if self.session.is_playing {
            self.resource.pause();
        } else {
            self.resource.play();
        }
        self.session.is_playing = !self.session.is_playing;
    }

    /// Seek to `fraction` of the track. `elapsed` follows immediately.
    pub fn on_seek(&mut self, fraction: f64) {
        let target = self.session.seek_target(fraction);
        self.seek_to(target);
    }

    /// Seek relative to the current position, clamped to the track bounds.
    pub fn scrub(&mut self, delta_secs: i64) {
        let delta = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs < 0 {
            self.session.elapsed.saturating_sub(delta)
        } else {
            (self.session.elapsed + delta).min(self.session.duration)
        };
        self.seek_to(target);
    }

    fn seek_to(&mut self, target: Duration) {
        self.resource.seek(target);
        self.session.elapsed = target;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.resource.set_volume(volume_for(muted));
    }

    pub fn handle_event(&mut self, event: &AudioEvent) {
        match *event {
            AudioEvent::MetadataLoaded { duration, .. } => {
                self.session.on_metadata_loaded(duration)
            }
            AudioEvent::TimeUpdate { elapsed, .. } => self.session.on_time_update(elapsed),
            AudioEvent::Ended { .. } => self.session.on_ended(),
        }
    }
}

/// Link-out panel for an externally hosted video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPanel {
    /// `None` when the watch URL has no `v=` parameter.
    pub embed_url: Option<String>,
}

pub enum PlayerBody {
    Audio(AudioPanel),
    Video(VideoPanel),
}

/// One playlist entry as rendered by the root view.
pub struct TrackPlayer {
    pub track: Track,
    pub body: PlayerBody,
}

impl TrackPlayer {
    /// Mount a component for `track`. `open` acquires the media resource for
    /// audio tracks and is not called for videos.
    pub fn mount<F>(track: Track, muted: bool, open: F) -> Self
    where
        F: FnOnce(&Track, &str, bool) -> Box<dyn MediaResource>,
    {
        let body = match &track.kind {
            TrackKind::Audio { audio_url } => {
                PlayerBody::Audio(AudioPanel::new(open(&track, audio_url.as_str(), muted)))
            }
            TrackKind::Video { video_url } => {
                let embed_url = embed_url(video_url);
                if embed_url.is_none() {
                    tracing::warn!(track = track.id, url = %video_url, "video url has no v= parameter");
                }
                PlayerBody::Video(VideoPanel { embed_url })
            }
        };
        Self { track, body }
    }

    pub fn id(&self) -> u32 {
        self.track.id
    }

    pub fn audio(&self) -> Option<&AudioPanel> {
        match &self.body {
            PlayerBody::Audio(p) => Some(p),
            PlayerBody::Video(_) => None,
        }
    }

    pub fn audio_mut(&mut self) -> Option<&mut AudioPanel> {
        match &mut self.body {
            PlayerBody::Audio(p) => Some(p),
            PlayerBody::Video(_) => None,
        }
    }

    pub fn video(&self) -> Option<&VideoPanel> {
        match &self.body {
            PlayerBody::Video(v) => Some(v),
            PlayerBody::Audio(_) => None,
        }
    }
}

//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helpers here encapsulate opening/decoding a file, preparing a paused
//! `Sink` at the requested start position and reading duration metadata.
//! The engine only sees them through [`Voice`] and [`VoiceSource`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

/// Create a paused `Sink` for the file at `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<Sink, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Read the total length of the file at `path` from its container metadata.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let d = tagged.properties().duration();
            if d.is_zero() { None } else { Some(d) }
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no duration metadata");
            None
        }
    }
}

/// One playing (or paused) stream of samples.
pub(super) trait Voice {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn set_volume(&self, volume: f32);
    /// True once everything queued has been played.
    fn empty(&self) -> bool;
}

/// Where the engine gets its voices and duration metadata from.
pub(super) trait VoiceSource {
    type Voice: Voice;

    /// A paused voice for `path`, starting at `start_at`.
    fn voice_at(
        &self,
        path: &Path,
        start_at: Duration,
        volume: f32,
    ) -> Result<Self::Voice, AudioError>;

    fn duration(&self, path: &Path) -> Option<Duration>;
}

impl Voice for Sink {
    fn play(&self) {
        Sink::play(self)
    }

    fn pause(&self) {
        Sink::pause(self)
    }

    fn stop(&self) {
        Sink::stop(self)
    }

    fn set_volume(&self, volume: f32) {
        Sink::set_volume(self, volume)
    }

    fn empty(&self) -> bool {
        Sink::empty(self)
    }
}

impl VoiceSource for OutputStream {
    type Voice = Sink;

    fn voice_at(&self, path: &Path, start_at: Duration, volume: f32) -> Result<Sink, AudioError> {
        create_sink_at(self, path, start_at, volume)
    }

    fn duration(&self, path: &Path) -> Option<Duration> {
        probe_duration(path)
    }
}

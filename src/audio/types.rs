//! Audio-related small types.
//!
//! Commands flow from resource handles to the engine thread, events flow
//! back to the UI loop. Both are keyed by the track id the resource was
//! opened for.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Identifies one open audio resource. Always the owning track's id.
pub type ResourceId = u32;

#[derive(Debug)]
pub enum AudioCmd {
    /// Acquire a resource for the file at `path`, initially paused.
    Open {
        id: ResourceId,
        path: PathBuf,
        volume: f32,
    },
    /// Start or resume playback.
    Play(ResourceId),
    /// Pause playback, keeping the position.
    Pause(ResourceId),
    /// Jump to an absolute position.
    Seek { id: ResourceId, to: Duration },
    /// Set output level, 0.0 (silent) to 1.0 (full).
    SetVolume { id: ResourceId, volume: f32 },
    /// Drop the resource. No events are emitted for it afterwards.
    Release(ResourceId),
    /// Quit the engine thread, fading out playing resources over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Lifecycle notifications emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// The resource's total length became known.
    MetadataLoaded { id: ResourceId, duration: Duration },
    /// Periodic playback position while playing.
    TimeUpdate { id: ResourceId, elapsed: Duration },
    /// Playback reached the natural end of the file.
    Ended { id: ResourceId },
}

impl AudioEvent {
    pub fn id(&self) -> ResourceId {
        match *self {
            AudioEvent::MetadataLoaded { id, .. }
            | AudioEvent::TimeUpdate { id, .. }
            | AudioEvent::Ended { id } => id,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoDevice(#[from] rodio::StreamError),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

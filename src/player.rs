//! Per-track playback components.
//!
//! A `TrackPlayer` renders one catalog entry. Audio entries own a
//! `PlaybackSession` and a media resource for their whole lifetime; video
//! entries only carry the derived embed link.

mod component;
mod format;
mod resource;
mod session;

pub use component::{AudioPanel, PlayerBody, TrackPlayer, VideoPanel};
pub use format::format_time;
pub use resource::{MediaResource, volume_for};
pub use session::PlaybackSession;

#[cfg(test)]
mod tests;

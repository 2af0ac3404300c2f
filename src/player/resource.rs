use std::time::Duration;

/// The playback primitive a component drives.
///
/// Implementations must not block: commands are requests, and the resource
/// reports back through lifecycle events.
pub trait MediaResource {
    fn play(&mut self);
    fn pause(&mut self);
    /// Jump to an absolute position.
    fn seek(&mut self, to: Duration);
    /// Output level, 0.0 (silent) to 1.0 (full).
    fn set_volume(&mut self, volume: f32);
}

/// Resource volume for the shared mute flag.
pub fn volume_for(muted: bool) -> f32 {
    if muted { 0.0 } else { 1.0 }
}

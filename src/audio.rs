//! Audio engine: one thread owning the output device and a `rodio` sink per
//! open resource.
//!
//! Components talk to it through [`AudioHandle`]s and hear back through
//! [`AudioEvent`]s.

mod clock;
mod engine;
mod sink;
mod thread;
mod types;

pub use engine::{AudioEngine, AudioHandle};
pub use types::*;

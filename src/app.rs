//! Application module: exposes the root view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the page-wide flags, the
//! contact form and the per-track playback components.

mod model;

pub use model::*;

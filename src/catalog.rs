//! Static track catalog.
//!
//! The catalog is read once at startup from `tracks.toml` and never changes
//! afterwards. Each entry is either a locally playable audio file or an
//! externally hosted video.

mod embed;
mod load;
mod model;

pub use embed::embed_url;
pub use load::{CatalogError, load_catalog};
pub use model::{Track, TrackKind};

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{Track, TrackKind};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate track id {0}")]
    DuplicateId(u32),
    #[error("track {id} has `{key}`, which does not match its type")]
    MismatchedUrl { id: u32, key: &'static str },
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Untyped view of the same document, for keys the typed one drops.
#[derive(Debug, Default, Deserialize)]
struct RawCatalogFile {
    #[serde(default)]
    tracks: Vec<toml::Table>,
}

/// Parse a catalog document. Track order is preserved; ids must be unique.
pub fn parse_catalog(text: &str) -> Result<Vec<Track>, CatalogError> {
    let file: CatalogFile = toml::from_str(text)?;

    let raw: RawCatalogFile = toml::from_str(text)?;

    let mut seen = HashSet::new();
    for (track, keys) in file.tracks.iter().zip(&raw.tracks) {
        if !seen.insert(track.id) {
            return Err(CatalogError::DuplicateId(track.id));
        }
        let foreign = match track.kind {
            TrackKind::Audio { .. } => "video_url",
            TrackKind::Video { .. } => "audio_url",
        };
        if keys.contains_key(foreign) {
            return Err(CatalogError::MismatchedUrl {
                id: track.id,
                key: foreign,
            });
        }
    }

    Ok(file.tracks)
}

/// Load the catalog at `path`.
///
/// A missing file is not an error: the playlist is simply empty.
pub fn load_catalog(path: &Path) -> Result<Vec<Track>, CatalogError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no track catalog found, playlist is empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let tracks = parse_catalog(&text)?;
    tracing::info!(path = %path.display(), count = tracks.len(), "loaded track catalog");
    Ok(tracks)
}

use serde::Deserialize;

/// One entry of the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub artist: String,
    #[serde(flatten)]
    pub kind: TrackKind,
}

/// What kind of media a track points at.
///
/// In `tracks.toml` this is the `type` key, with the matching URL key next to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TrackKind {
    Audio {
        audio_url: String,
    },
    #[serde(alias = "youtube")]
    Video {
        video_url: String,
    },
}

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Extract the video id from a watch URL: everything after the first `v=`
/// up to the next `&`.
///
/// Returns `None` when there is no `v=` marker or nothing follows it.
pub fn embed_id(video_url: &str) -> Option<&str> {
    let (_, rest) = video_url.split_once("v=")?;
    let id = rest.split('&').next().unwrap_or(rest);
    if id.is_empty() { None } else { Some(id) }
}

/// Build the embeddable frame URL for a watch URL.
pub fn embed_url(video_url: &str) -> Option<String> {
    embed_id(video_url).map(|id| format!("{EMBED_BASE}{id}"))
}

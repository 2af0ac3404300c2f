use std::path::{Path, PathBuf};

use crate::app::App;
use crate::audio::AudioEngine;
use crate::catalog::{self, CatalogError};
use crate::config;
use crate::gallery;

/// Resolve a page-relative locator against the site directory.
///
/// A leading `/` means "site root", as it would on the web, unless the path
/// already exists on disk as given.
pub fn resolve_asset(site_dir: &Path, locator: &str) -> PathBuf {
    let p = Path::new(locator);
    if p.is_absolute() {
        if p.exists() {
            return p.to_path_buf();
        }
        return site_dir.join(locator.trim_start_matches('/'));
    }
    site_dir.join(p)
}

/// Load the catalog and gallery and mount every component.
pub fn build_app(
    settings: &config::Settings,
    site_dir: &Path,
    engine: &AudioEngine,
) -> Result<App, CatalogError> {
    let catalog_path = site_dir.join(&settings.site.catalog);
    let tracks = catalog::load_catalog(&catalog_path)?;

    let mut app = App::new(tracks, settings.audio.start_muted, |track, audio_url, muted| {
        let path = resolve_asset(site_dir, audio_url);
        Box::new(engine.open(track.id, path, muted))
    });
    app.focus = settings.ui.initial_focus.into();

    if settings.ui.show_gallery {
        let hero = site_dir.join(&settings.site.hero_image);
        let photos = gallery::scan(&site_dir.join(&settings.site.gallery_dir), Some(&hero));
        tracing::debug!(count = photos.len(), "gallery scanned");
        app.set_photos(photos);
    }

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_asset_joins_relative_locators() {
        let site = Path::new("/srv/site");
        assert_eq!(
            resolve_asset(site, "music/a.mp3"),
            PathBuf::from("/srv/site/music/a.mp3")
        );
        assert_eq!(
            resolve_asset(site, "./music/a.mp3"),
            PathBuf::from("/srv/site/./music/a.mp3")
        );
    }

    #[test]
    fn resolve_asset_treats_missing_absolute_paths_as_site_root() {
        let site = Path::new("/srv/site");
        assert_eq!(
            resolve_asset(site, "/definitely/not/here/a.mp3"),
            PathBuf::from("/srv/site/definitely/not/here/a.mp3")
        );
    }

    #[test]
    fn resolve_asset_keeps_existing_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.mp3");
        std::fs::write(&file, b"x").unwrap();
        assert_eq!(
            resolve_asset(Path::new("/srv/site"), file.to_str().unwrap()),
            file
        );
    }
}

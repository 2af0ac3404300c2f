use std::path::Path;

use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// One photo in the gallery section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub name: String,
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the photos directly inside `dir`, skipping `exclude` (the hero image),
/// sorted by file name.
pub fn scan(dir: &Path, exclude: Option<&Path>) -> Vec<Photo> {
    let mut photos: Vec<Photo> = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && !is_hidden(path) && is_image_file(path))
        .filter(|path| exclude.is_none_or(|ex| path != ex))
        .map(|path| Photo {
            name: path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string(),
        })
        .collect();

    photos.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    photos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_image_file_matches_known_extensions_case_insensitive() {
        assert!(is_image_file(Path::new("/tmp/a.jpg")));
        assert!(is_image_file(Path::new("/tmp/a.JPG")));
        assert!(is_image_file(Path::new("/tmp/a.webp")));
        assert!(!is_image_file(Path::new("/tmp/a.mp3")));
        assert!(!is_image_file(Path::new("/tmp/a")));
    }

    #[test]
    fn scan_lists_images_sorted_and_skips_hero_hidden_and_subdirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("00.jpg"), b"hero").unwrap();
        fs::write(dir.path().join("02.jpg"), b"x").unwrap();
        fs::write(dir.path().join("01.PNG"), b"x").unwrap();
        fs::write(dir.path().join(".03.jpg"), b"x").unwrap();
        fs::write(dir.path().join("tracks.toml"), b"").unwrap();
        let sub = dir.path().join("raw");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("04.jpg"), b"x").unwrap();

        let hero = dir.path().join("00.jpg");
        let photos = scan(dir.path(), Some(&hero));
        let names: Vec<&str> = photos.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["01.PNG", "02.jpg"]);
    }

    #[test]
    fn scan_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(scan(&dir.path().join("nope"), None).is_empty());
    }
}

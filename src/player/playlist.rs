//! Playlist scanning.
//!
//! The playlist is rebuilt wholesale from a single directory; entries
//! are never removed individually. Sorting by file name keeps index
//! addressing stable within one scan.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Audio file extensions the player accepts (case-insensitive).
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "flac"];

/// One playlist entry. Identity is the path; `display` is the file name
/// shown in the player pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display: String,
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

/// Scan `dir` non-recursively for audio files. A missing directory is
/// created and yields an empty playlist.
pub fn scan_music_dir(dir: &Path) -> Vec<Track> {
    if !dir.exists() {
        match fs::create_dir_all(dir) {
            Ok(()) => tracing::info!(dir = %dir.display(), "created music folder"),
            Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "cannot create music folder"),
        }
        return Vec::new();
    }

    let mut tracks: Vec<Track> = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path) {
            let display = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();
            tracks.push(Track {
                path: path.to_path_buf(),
                display,
            });
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_known_extensions_case_insensitive() {
        assert!(is_audio_file(Path::new("/tmp/a.mp3")));
        assert!(is_audio_file(Path::new("/tmp/a.MP3")));
        assert!(is_audio_file(Path::new("/tmp/a.flac")));
        assert!(is_audio_file(Path::new("/tmp/a.wav")));
        assert!(is_audio_file(Path::new("/tmp/a.ogg")));
        assert!(!is_audio_file(Path::new("/tmp/a.txt")));
        assert!(!is_audio_file(Path::new("/tmp/a")));
    }

    #[test]
    fn scan_filters_non_audio_and_sorts_by_name_case_insensitive() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let tracks = scan_music_dir(dir.path());
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].display, "A.ogg");
        assert_eq!(tracks[1].display, "b.MP3");
    }

    #[test]
    fn scan_is_non_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let tracks = scan_music_dir(dir.path());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].display, "root.mp3");
    }

    #[test]
    fn scan_creates_missing_directory_and_returns_empty() {
        let dir = tempdir().unwrap();
        let music = dir.path().join("Music");

        let tracks = scan_music_dir(&music);
        assert!(tracks.is_empty());
        assert!(music.is_dir());
    }
}

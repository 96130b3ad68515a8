use std::path::Path;

use walkdir::WalkDir;

use crate::config::SourceSettings;
use crate::playlist::{Locator, Track};

fn is_audio_file(path: &Path, settings: &SourceSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect the audio files under `dir` as local tracks, sorted by
/// case-folded name. Input order on disk is irrelevant.
pub fn scan(dir: &Path, settings: &SourceSettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file() && is_audio_file(e.path(), settings))
        .map(|e| {
            let path = e.path();
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();
            Track {
                name,
                locator: Locator::Local(path.to_path_buf()),
            }
        })
        .collect();

    tracks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    tracks
}

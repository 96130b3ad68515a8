use std::path::{Path, PathBuf};

use rand::Rng;
use reqwest::blocking::Client;

use crate::audio::PlayerCmd;
use crate::config::Settings;
use crate::playlist::Track;
use crate::source;

/// Where the playlist comes from: an HTTP base URL carrying a manifest,
/// or a local directory to scan.
pub enum SourceMode {
    Remote { base: String },
    Local { dir: PathBuf },
}

/// A URL argument selects remote mode, anything else is a directory.
/// Without an argument the current directory is scanned.
pub fn source_mode(arg: Option<String>) -> SourceMode {
    match arg {
        Some(a) if a.starts_with("http://") || a.starts_with("https://") => SourceMode::Remote {
            base: a.trim_end_matches('/').to_string(),
        },
        Some(a) => SourceMode::Local {
            dir: PathBuf::from(a),
        },
        None => SourceMode::Local {
            dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        },
    }
}

/// Resolve the playlist for `mode`. A failed manifest fetch degrades to
/// an empty playlist with the failure folded into the source label.
pub fn gather_tracks(mode: &SourceMode, client: &Client, settings: &Settings) -> (Vec<Track>, String) {
    match mode {
        SourceMode::Remote { base } => match source::fetch_manifest(client, base, &settings.source)
        {
            Ok(tracks) => (tracks, base.clone()),
            Err(e) => {
                log::error!("manifest fetch failed: {e}");
                (Vec::new(), format!("{base} (manifest unavailable)"))
            }
        },
        SourceMode::Local { dir } => (
            source::scan(Path::new(dir), &settings.source),
            dir.display().to_string(),
        ),
    }
}

/// Remote playlists start somewhere random, local ones at the top.
pub fn initial_index(mode: &SourceMode, len: usize) -> usize {
    match mode {
        SourceMode::Remote { .. } if len > 0 => rand::rng().random_range(0..len),
        _ => 0,
    }
}

/// The command that binds the starting track. It always loads so the
/// duration and seek strip work from the first draw; playback itself
/// only begins when configured to.
pub fn initial_command(settings: &Settings, start: usize, len: usize) -> Option<PlayerCmd> {
    if len == 0 {
        return None;
    }
    Some(PlayerCmd::Play {
        index: start,
        autostart: settings.playback.autostart,
    })
}

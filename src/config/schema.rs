use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/ghostwave/config.toml` or
/// `~/.config/ghostwave/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `GHOSTWAVE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub playback: PlaybackSettings,
    pub volume: VolumeSettings,
    pub probe: ProbeSettings,
    pub wave: WaveSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            playback: PlaybackSettings::default(),
            volume: VolumeSettings::default(),
            probe: ProbeSettings::default(),
            wave: WaveSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Manifest filename fetched under the remote base location.
    pub manifest_file: String,
    /// Directory recursion cap for local mode; `None` recurses fully.
    pub max_depth: Option<usize>,
    /// Whether to include hidden files (dotfiles) in local mode.
    pub include_hidden: bool,
    /// HTTP request timeout in milliseconds (manifest and track fetches).
    pub request_timeout_ms: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            manifest_file: "manifest.json".to_string(),
            max_depth: Some(1),
            include_hidden: false,
            request_timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether the first bound track starts playing immediately.
    pub autostart: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            autostart: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VolumeSettings {
    /// Initial linear volume in [0, 1]; also the fallback restored by
    /// unmute when no non-zero volume was recorded.
    pub initial: f32,
    /// Step applied by the volume keys.
    pub step: f32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            initial: 0.85,
            step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Per-track duration probe timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    /// Per-frame fade applied to the surface; higher fades the trail faster.
    pub ghost_fade: f32,
    /// Fraction of the surface height covered by a full-scale swing.
    pub span: f32,
    /// Per-frame probability of the cosmetic glitch band.
    pub glitch_chance: f32,
    /// Render loop period in milliseconds.
    pub frame_ms: u64,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            ghost_fade: 0.10,
            span: 0.78,
            glitch_chance: 0.05,
            frame_ms: 33,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ ghostwave ~ ".to_string(),
        }
    }
}

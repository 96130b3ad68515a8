//! Playback-related small types and handles.
//!
//! This module defines the command enum consumed by the audio thread, the
//! shared playback info published back to the UI and the volume state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Cadence at which position/duration are published and displayed.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(120);

/// Volume restored by unmute when no non-zero volume was ever recorded.
const DEFAULT_RESTORE: f32 = 0.85;

#[derive(Debug)]
pub enum PlayerCmd {
    /// Select track `index` and bind it; start playing when `autostart`.
    Play { index: usize, autostart: bool },
    /// Load-and-start the current index, or flip play/pause.
    TogglePlay,
    /// Advance forward and play.
    Next,
    /// Advance backward and play.
    Prev,
    /// Set the current index without touching playback.
    Select(usize),
    /// Flip the shuffle flag.
    ToggleShuffle,
    /// Set the linear volume (clamped to [0, 1]).
    SetVolume(f32),
    /// Mute, or restore the last non-zero volume.
    ToggleMute,
    /// Seek to a fraction of the bound track's duration.
    SeekTo(f64),
    /// Stop playback and end the audio thread.
    Quit,
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Current playlist index (selection and playing position).
    pub current: usize,
    /// Whether a track is bound to the sink.
    pub bound: bool,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Elapsed playback time for the bound track.
    pub elapsed: Duration,
    /// Duration of the bound track, when known.
    pub duration: Option<Duration>,
    pub shuffle: bool,
    pub volume: f32,
    pub muted: bool,
}

impl PlaybackInfo {
    /// Progress through the bound track in [0, 1]; 0 until the duration is
    /// known.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if d > Duration::ZERO => {
                (self.elapsed.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            current: 0,
            bound: false,
            playing: false,
            elapsed: Duration::ZERO,
            duration: None,
            shuffle: false,
            volume: DEFAULT_RESTORE,
            muted: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Linear volume plus mute flag plus the value unmute restores.
#[derive(Debug, Clone)]
pub struct VolumeState {
    volume: f32,
    muted: bool,
    last_nonzero: f32,
}

impl VolumeState {
    pub fn new(initial: f32) -> Self {
        let volume = initial.clamp(0.0, 1.0);
        Self {
            volume,
            muted: volume == 0.0,
            last_nonzero: if volume > 0.0 { volume } else { DEFAULT_RESTORE },
        }
    }

    /// Clamp and apply `v`; a positive value is remembered for unmute and a
    /// zero value counts as muting.
    pub fn set_volume(&mut self, v: f32) {
        let v = v.clamp(0.0, 1.0);
        self.volume = v;
        if v > 0.0 {
            self.last_nonzero = v;
        }
        self.muted = v == 0.0;
    }

    /// Mute to zero, or restore the volume recorded before the most recent
    /// mute (0.85 when none was recorded).
    pub fn toggle_mute(&mut self) {
        if self.indicates_muted() {
            self.muted = false;
            self.volume = if self.last_nonzero > 0.0 {
                self.last_nonzero
            } else {
                DEFAULT_RESTORE
            };
        } else {
            if self.volume > 0.0 {
                self.last_nonzero = self.volume;
            }
            self.muted = true;
            self.volume = 0.0;
        }
    }

    /// The mute indicator state: explicitly muted or slid down to zero.
    pub fn indicates_muted(&self) -> bool {
        self.muted || self.volume == 0.0
    }

    /// Level actually applied to the sink.
    pub fn effective(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

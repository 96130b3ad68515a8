use std::time::{Duration, Instant};

use rand::rngs::ThreadRng;
use ratatui::widgets::ListState;

use crate::audio::{PlaybackHandle, PlaybackInfo};
use crate::config::Settings;
use crate::playlist::Track;
use crate::probe::TotalHandle;
use crate::wave::{ScopeHandle, Surface};

pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Everything the draw pass reads. Playback info is a snapshot taken on
/// the refresh cadence, not a live lock, so the clock and progress bar
/// update in visible steps rather than per animation frame.
pub struct App {
    pub tracks: Vec<Track>,
    pub source_label: String,
    pub info: PlaybackInfo,
    pub total_secs: Option<u64>,
    pub surface: Surface,
    pub list_state: ListState,
    pub should_quit: bool,
    /// When set, the list cursor tracks the bound track. Moving the
    /// cursor by hand releases it; playing something re-engages it.
    pub follow: bool,
    playback: PlaybackHandle,
    scope: ScopeHandle,
    total: TotalHandle,
    rng: ThreadRng,
    last_click: Option<(usize, Instant)>,
}

impl App {
    pub fn new(
        tracks: Vec<Track>,
        source_label: String,
        playback: PlaybackHandle,
        scope: ScopeHandle,
        total: TotalHandle,
        settings: &Settings,
    ) -> Self {
        let mut list_state = ListState::default();
        if !tracks.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            tracks,
            source_label,
            info: PlaybackInfo::default(),
            total_secs: None,
            surface: Surface::new(&settings.wave),
            list_state,
            should_quit: false,
            follow: true,
            playback,
            scope,
            total,
            rng: rand::rng(),
            last_click: None,
        }
    }

    /// Pull the latest playback snapshot and keep the list cursor on the
    /// bound track.
    pub fn refresh(&mut self) {
        if let Ok(info) = self.playback.lock() {
            self.info = info.clone();
        }
        if let Ok(total) = self.total.lock() {
            self.total_secs = *total;
        }
        if self.follow && !self.tracks.is_empty() {
            self.list_state.select(Some(self.info.current));
        }
    }

    pub fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn cursor_up(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.follow = false;
        let at = self.cursor();
        self.list_state.select(Some(at.saturating_sub(1)));
    }

    pub fn cursor_down(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.follow = false;
        let at = self.cursor();
        self.list_state
            .select(Some((at + 1).min(self.tracks.len() - 1)));
    }

    pub fn cursor_to(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.follow = false;
            self.list_state.select(Some(index));
        }
    }

    /// Advance the waveform one animation frame from the current scope
    /// window.
    pub fn animate(&mut self) {
        let snapshot = self.scope.lock().ok().and_then(|s| s.snapshot_bytes());
        self.surface.frame(snapshot.as_deref(), &mut self.rng);
    }

    pub fn current_track_name(&self) -> Option<&str> {
        self.tracks.get(self.info.current).map(|t| t.name.as_str())
    }

    /// Register a click on list row `index`. Returns true when it lands
    /// on the same row within the double-click window.
    pub fn register_click(&mut self, index: usize) -> bool {
        let now = Instant::now();
        let double = matches!(
            self.last_click,
            Some((i, at)) if i == index && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
        );
        self.last_click = if double { None } else { Some((index, now)) };
        double
    }
}

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::mpsc;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use crate::config::Settings;
use crate::playlist::{Playlist, Track};
use crate::wave::{ScopeHandle, scope_handle};

use super::bind::Binder;
use super::thread::spawn_player_thread;
use super::types::{PlaybackHandle, PlaybackInfo, PlayerCmd, VolumeState};

/// Front door to the audio thread. The playlist lives on the thread;
/// the UI talks to it through commands and reads back through the
/// shared playback info and scope handles.
pub struct AudioPlayer {
    tx: Sender<PlayerCmd>,
    info: PlaybackHandle,
    scope: ScopeHandle,
    thread: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    pub fn new(
        tracks: Vec<Track>,
        start: usize,
        client: reqwest::blocking::Client,
        settings: &Settings,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let scope = scope_handle();

        let mut playlist = Playlist::new();
        playlist.load(tracks, start);
        if settings.playback.shuffle {
            playlist.toggle_shuffle();
        }

        let binder = Binder::new(client);
        let volume = VolumeState::new(settings.volume.initial);

        let thread = spawn_player_thread(
            playlist,
            rx,
            Arc::clone(&info),
            scope.clone(),
            binder,
            volume,
        );

        Self {
            tx,
            info,
            scope,
            thread: Some(thread),
        }
    }

    pub fn send(&self, cmd: PlayerCmd) {
        // A send failure means the audio thread is already gone; the
        // event loop is about to notice via quit anyway.
        if self.tx.send(cmd).is_err() {
            log::error!("audio thread unreachable");
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        Arc::clone(&self.info)
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.clone()
    }

    /// Stop playback and wait for the thread to wind down.
    pub fn quit(&mut self) {
        let _ = self.tx.send(PlayerCmd::Quit);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

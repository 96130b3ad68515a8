use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::playlist::{Direction, Playlist};
use crate::wave::ScopeHandle;

use super::bind::{Binder, Binding};
use super::types::{PlaybackHandle, PlayerCmd, REFRESH_INTERVAL, VolumeState};

pub(super) fn spawn_player_thread(
    playlist: Playlist,
    rx: Receiver<PlayerCmd>,
    info: PlaybackHandle,
    scope: ScopeHandle,
    binder: Binder,
    volume: VolumeState,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when the stream drops, which garbles the
        // alternate screen on exit.
        stream.log_on_drop(false);

        let mut player = Player {
            stream,
            playlist,
            binder,
            scope,
            info,
            volume,
            sink: None,
            binding: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        };
        player.publish();

        loop {
            // The timeout doubles as the fixed polling cadence: on every
            // wake we check for auto-advance and republish position.
            match rx.recv_timeout(REFRESH_INTERVAL) {
                Ok(cmd) => {
                    if player.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    player.auto_advance();
                    player.publish();
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Thread-local playback state: the playlist, the sink and the single
/// outstanding binding (which owns the transient spool, if any).
struct Player {
    stream: OutputStream,
    playlist: Playlist,
    binder: Binder,
    scope: ScopeHandle,
    info: PlaybackHandle,
    volume: VolumeState,
    sink: Option<Sink>,
    binding: Option<Binding>,
    paused: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Player {
    /// Returns true when the thread should end.
    fn handle(&mut self, cmd: PlayerCmd) -> bool {
        match cmd {
            PlayerCmd::Play { index, autostart } => self.play_index(index, autostart),
            PlayerCmd::TogglePlay => self.toggle_play(),
            PlayerCmd::Next => {
                let next = self.playlist.advance(Direction::Forward);
                self.play_index(next, true);
            }
            PlayerCmd::Prev => {
                let prev = self.playlist.advance(Direction::Back);
                self.play_index(prev, true);
            }
            PlayerCmd::Select(i) => {
                self.playlist.select(i);
                self.publish();
            }
            PlayerCmd::ToggleShuffle => {
                self.playlist.toggle_shuffle();
                self.publish();
            }
            PlayerCmd::SetVolume(v) => {
                self.volume.set_volume(v);
                self.apply_volume();
            }
            PlayerCmd::ToggleMute => {
                self.volume.toggle_mute();
                self.apply_volume();
            }
            PlayerCmd::SeekTo(fraction) => self.seek_to(fraction),
            PlayerCmd::Quit => {
                if let Some(s) = self.sink.take() {
                    s.stop();
                }
                self.binding = None;
                self.playing_off();
                self.publish();
                return true;
            }
        }
        false
    }

    /// Select track `i`, release the previous binding (and with it the
    /// transient spool), bind the new locator and reload the sink. A bind
    /// or decode failure is absorbed: the player stays paused so the user
    /// can retry explicitly.
    fn play_index(&mut self, i: usize, autostart: bool) {
        if self.playlist.get(i).is_none() {
            return;
        }
        self.playlist.select(i);

        if let Some(s) = self.sink.take() {
            s.stop();
        }
        // Old spool is released before its replacement exists.
        self.binding = None;

        let track = match self.playlist.get(i) {
            Some(t) => t.clone(),
            None => return,
        };

        let binding = match self.binder.bind(&track) {
            Ok(b) => b,
            Err(err) => {
                log::warn!("failed to bind \"{}\": {err}", track.name);
                self.playing_off();
                self.publish();
                return;
            }
        };

        match binding.sink_at(&self.stream, &self.scope, Duration::ZERO) {
            Ok(sink) => {
                sink.set_volume(self.volume.effective());
                if autostart {
                    sink.play();
                    self.paused = false;
                    self.started_at = Some(Instant::now());
                } else {
                    self.paused = true;
                    self.started_at = None;
                }
                self.accumulated = Duration::ZERO;
                self.sink = Some(sink);
                self.binding = Some(binding);
                log::info!("bound \"{}\" (autostart={autostart})", track.name);
            }
            Err(err) => {
                log::warn!("failed to start \"{}\": {err}", track.name);
                self.playing_off();
            }
        }
        self.publish();
    }

    /// Load-and-start when nothing is bound, otherwise flip play/pause.
    fn toggle_play(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        if self.sink.is_none() {
            let current = self.playlist.current();
            self.play_index(current, true);
            return;
        }

        if let Some(s) = &self.sink {
            if self.paused {
                s.play();
                self.started_at = Some(Instant::now());
                self.paused = false;
            } else {
                s.pause();
                if let Some(st) = self.started_at.take() {
                    self.accumulated += st.elapsed();
                }
                self.paused = true;
                self.flatten_scope();
            }
        }
        self.publish();
    }

    /// Seek to `fraction` of the bound track. Unknown duration: no-op.
    fn seek_to(&mut self, fraction: f64) {
        let Some(binding) = &self.binding else {
            return;
        };
        let Some(duration) = binding.duration else {
            return;
        };

        let at = duration.mul_f64(fraction.clamp(0.0, 1.0));
        if let Some(s) = self.sink.take() {
            s.stop();
        }

        match binding.sink_at(&self.stream, &self.scope, at) {
            Ok(sink) => {
                sink.set_volume(self.volume.effective());
                if self.paused {
                    self.started_at = None;
                } else {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.accumulated = at;
                self.sink = Some(sink);
            }
            Err(err) => {
                log::warn!("seek failed: {err}");
                self.playing_off();
            }
        }
        self.publish();
    }

    /// When the sink drained while playing, the track ended: advance and
    /// keep playing.
    fn auto_advance(&mut self) {
        let ended = matches!(&self.sink, Some(s) if !self.paused && s.empty());
        if ended {
            let next = self.playlist.advance(Direction::Forward);
            log::debug!("track ended, advancing to {next}");
            self.play_index(next, true);
        }
    }

    fn apply_volume(&mut self) {
        if let Some(s) = &self.sink {
            s.set_volume(self.volume.effective());
        }
        self.publish();
    }

    fn playing_off(&mut self) {
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.flatten_scope();
    }

    fn flatten_scope(&self) {
        if let Ok(mut scope) = self.scope.lock() {
            scope.flatten();
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.current = self.playlist.current();
            info.bound = self.binding.is_some();
            info.playing = self.sink.is_some() && !self.paused;
            info.elapsed = self.elapsed();
            info.duration = self.binding.as_ref().and_then(|b| b.duration);
            info.shuffle = self.playlist.shuffle();
            info.volume = self.volume.volume();
            info.muted = self.volume.indicates_muted();
        }
    }
}

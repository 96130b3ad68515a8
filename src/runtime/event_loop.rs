use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, PlayerCmd, REFRESH_INTERVAL};
use crate::config;
use crate::ui;

use super::ticker::{Tick, Ticker};

const SEEK_STEP: f64 = 0.05;

#[derive(Debug, Copy, Clone)]
enum Action {
    Quit,
    TogglePlay,
    PlayCursor,
    CursorUp,
    CursorDown,
    Prev,
    Next,
    ToggleShuffle,
    ToggleMute,
    VolumeDown,
    VolumeUp,
    SeekBack,
    SeekForward,
}

/// Key dispatch table; first match wins.
const KEYMAP: &[(KeyCode, Action)] = &[
    (KeyCode::Char('q'), Action::Quit),
    (KeyCode::Esc, Action::Quit),
    (KeyCode::Char(' '), Action::TogglePlay),
    (KeyCode::Char('p'), Action::TogglePlay),
    (KeyCode::Enter, Action::PlayCursor),
    (KeyCode::Char('j'), Action::CursorDown),
    (KeyCode::Down, Action::CursorDown),
    (KeyCode::Char('k'), Action::CursorUp),
    (KeyCode::Up, Action::CursorUp),
    (KeyCode::Char('h'), Action::Prev),
    (KeyCode::Left, Action::Prev),
    (KeyCode::Char('l'), Action::Next),
    (KeyCode::Right, Action::Next),
    (KeyCode::Char('s'), Action::ToggleShuffle),
    (KeyCode::Char('m'), Action::ToggleMute),
    (KeyCode::Char('9'), Action::VolumeDown),
    (KeyCode::Char('0'), Action::VolumeUp),
    (KeyCode::Char(','), Action::SeekBack),
    (KeyCode::Char('.'), Action::SeekForward),
];

/// Main terminal event loop: input, ticker wake-ups and drawing. The
/// frame ticker paces the waveform animation, the refresh ticker paces
/// playback-info reads; input is drained between wake-ups. Returns
/// `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tick_tx, tick_rx) = mpsc::channel();
    let mut frame_ticker = Ticker::spawn(
        Duration::from_millis(settings.wave.frame_ms),
        Tick::Frame,
        tick_tx.clone(),
    );
    let mut refresh_ticker = Ticker::spawn(REFRESH_INTERVAL, Tick::Refresh, tick_tx);

    // First draw happens with real data, not the default snapshot.
    app.refresh();

    loop {
        match tick_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(Tick::Frame) => app.animate(),
            Ok(Tick::Refresh) => app.refresh(),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        // Coalesce a backlog of ticks into one pass of each kind.
        let mut pending_frame = false;
        let mut pending_refresh = false;
        while let Ok(tick) = tick_rx.try_recv() {
            match tick {
                Tick::Frame => pending_frame = true,
                Tick::Refresh => pending_refresh = true,
            }
        }
        if pending_frame {
            app.animate();
        }
        if pending_refresh {
            app.refresh();
        }

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(key, settings, app, audio_player);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    handle_mouse(mouse, area, app, audio_player);
                }
                _ => {}
            }
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if app.should_quit {
            break;
        }
    }

    frame_ticker.stop();
    refresh_ticker.stop();
    Ok(())
}

fn handle_key(key: KeyEvent, settings: &config::Settings, app: &mut App, audio_player: &AudioPlayer) {
    let Some(action) = KEYMAP
        .iter()
        .find(|(code, _)| *code == key.code)
        .map(|(_, action)| *action)
    else {
        return;
    };

    match action {
        Action::Quit => app.should_quit = true,
        Action::TogglePlay => {
            app.follow = true;
            audio_player.send(PlayerCmd::TogglePlay);
        }
        Action::PlayCursor => {
            if !app.tracks.is_empty() {
                app.follow = true;
                audio_player.send(PlayerCmd::Play {
                    index: app.cursor(),
                    autostart: true,
                });
            }
        }
        Action::CursorDown => app.cursor_down(),
        Action::CursorUp => app.cursor_up(),
        Action::Prev => {
            app.follow = true;
            audio_player.send(PlayerCmd::Prev);
        }
        Action::Next => {
            app.follow = true;
            audio_player.send(PlayerCmd::Next);
        }
        Action::ToggleShuffle => audio_player.send(PlayerCmd::ToggleShuffle),
        Action::ToggleMute => audio_player.send(PlayerCmd::ToggleMute),
        Action::VolumeDown => {
            let v = (app.info.volume - settings.volume.step).max(0.0);
            audio_player.send(PlayerCmd::SetVolume(v));
        }
        Action::VolumeUp => {
            let v = (app.info.volume + settings.volume.step).min(1.0);
            audio_player.send(PlayerCmd::SetVolume(v));
        }
        Action::SeekBack => {
            audio_player.send(PlayerCmd::SeekTo((app.info.progress() - SEEK_STEP).max(0.0)));
        }
        Action::SeekForward => {
            audio_player.send(PlayerCmd::SeekTo((app.info.progress() + SEEK_STEP).min(1.0)));
        }
    }
}

fn handle_mouse(mouse: MouseEvent, area: Rect, app: &mut App, audio_player: &AudioPlayer) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let panes = ui::panes(area);
    let (col, row) = (mouse.column, mouse.row);

    if let Some(i) = ui::list_index_at(&panes, app.list_state.offset(), col, row) {
        if i < app.tracks.len() {
            app.cursor_to(i);
            if app.register_click(i) {
                app.follow = true;
                audio_player.send(PlayerCmd::Play {
                    index: i,
                    autostart: true,
                });
            }
        }
        return;
    }
    if let Some(fraction) = ui::progress_fraction_at(&panes, col, row) {
        audio_player.send(PlayerCmd::SeekTo(fraction));
        return;
    }
    if let Some(fraction) = ui::volume_fraction_at(&panes, col, row) {
        audio_player.send(PlayerCmd::SetVolume(fraction as f32));
    }
}

use std::env;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::probe::Prober;

mod event_loop;
mod logging;
mod settings;
mod startup;
mod ticker;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let settings = settings::load_settings();

    let mode = startup::source_mode(env::args().nth(1));
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(settings.source.request_timeout_ms))
        .build()?;

    let (tracks, label) = startup::gather_tracks(&mode, &client, &settings);
    let start = startup::initial_index(&mode, tracks.len());

    let mut audio_player = AudioPlayer::new(tracks.clone(), start, client.clone(), &settings);

    let prober = Prober::new(client, &settings);
    prober.spawn(tracks.clone());

    let mut app = App::new(
        tracks,
        label,
        audio_player.playback_handle(),
        audio_player.scope_handle(),
        prober.total_handle(),
        &settings,
    );

    if let Some(cmd) = startup::initial_command(&settings, start, app.tracks.len()) {
        audio_player.send(cmd);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &audio_player);

    audio_player.quit();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    run_result
}

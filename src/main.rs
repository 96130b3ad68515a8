//! ghostwave: a terminal playlist player with a phosphor-trace waveform.
//!
//! Plays a local directory of audio files or a remote manifest-backed
//! playlist, with the waveform of whatever is playing smeared across the
//! middle of the screen.

mod app;
mod audio;
mod config;
mod playlist;
mod probe;
mod runtime;
mod source;
mod ui;
mod wave;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}

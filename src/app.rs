//! UI-side state: the track list snapshot, the waveform surface and the
//! last playback info pulled from the audio thread.

mod model;

pub use model::{App, DOUBLE_CLICK_WINDOW};

//! Playback subsystem: the audio thread that owns the playlist, the rodio
//! sink, the single transient spool handle and the volume state.

mod bind;
mod player;
mod spool;
mod tap;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use spool::{Spool, SpoolLedger};
pub use types::{PlaybackHandle, PlaybackInfo, PlayerCmd, VolumeState, REFRESH_INTERVAL};

pub(crate) use bind::suffix_for;

#[cfg(test)]
mod tests;

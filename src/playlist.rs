//! Playlist model: tracks, current index, shuffle and advance rules.
//!
//! The `Playlist` lives inside the audio thread and is the single owner of
//! the ordered track list and the current index.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

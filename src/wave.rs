//! Waveform visualization: the scope ring fed by the playback tap and the
//! persistence surface the render loop draws into.
//!
//! The surface is a plain intensity grid so every drawing rule (ghost fade,
//! layered stroke, glitch band) is testable without a terminal.

mod scope;
mod surface;

pub use scope::{scope_handle, Scope, ScopeHandle, SCOPE_SAMPLES};
pub use surface::Surface;

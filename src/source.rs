//! Track source loading: remote manifest fetch or local directory scan.
//!
//! The two modes are mutually exclusive per session; `runtime::startup`
//! decides the mode once from the source argument's scheme.

mod local;
mod manifest;

pub use local::scan;
pub use manifest::{fetch_manifest, parse_manifest};

#[cfg(test)]
mod tests;

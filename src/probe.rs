//! Background duration probing for the whole playlist. The aggregate
//! total shows up in the header once every track answered (or timed out).

mod runner;

pub use runner::{Prober, TotalHandle};

#[cfg(test)]
mod tests;

//! Source wrapper that mirrors every played sample into the scope ring.
//!
//! This is the signal-analysis graph of the player: it sits between the
//! decoder and the sink, so whatever reaches the output also reaches the
//! visualizer.

use std::time::Duration;

use rodio::Source;

use crate::wave::ScopeHandle;

const CHUNK: usize = 1024;

pub struct Tap<S> {
    inner: S,
    scope: ScopeHandle,
    chunk: Vec<f32>,
}

impl<S> Tap<S> {
    pub fn new(inner: S, scope: ScopeHandle) -> Self {
        Self {
            inner,
            scope,
            chunk: Vec::with_capacity(CHUNK),
        }
    }
}

impl<S: Source> Iterator for Tap<S> {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.inner.next()?;
        self.chunk.push(sample);

        // Hand samples over in chunks to keep lock traffic off the mixer's
        // per-sample path.
        if self.chunk.len() >= CHUNK {
            if let Ok(mut scope) = self.scope.lock() {
                scope.push_samples(&self.chunk);
            }
            self.chunk.clear();
        }

        Some(sample)
    }
}

impl<S: Source> Source for Tap<S> {
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

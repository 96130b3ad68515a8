use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Size of the sliding sample window, matching a 2048-point analyser.
pub const SCOPE_SAMPLES: usize = 2048;

/// Sliding window of the most recent playback samples.
///
/// The tap pushes normalized f32 samples; the render loop reads them back
/// as byte-domain values (0..=255, 128 = center) like a time-domain
/// analyser would hand out. Until the first push there is no signal graph
/// and `snapshot_bytes` returns `None`.
pub struct Scope {
    samples: VecDeque<f32>,
    max_samples: usize,
    primed: bool,
}

impl Scope {
    pub fn new(max_samples: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
            primed: false,
        }
    }

    pub fn push_samples(&mut self, new_samples: &[f32]) {
        for &sample in new_samples {
            self.samples.push_back(sample);
            while self.samples.len() > self.max_samples {
                self.samples.pop_front();
            }
        }
        if !new_samples.is_empty() {
            self.primed = true;
        }
    }

    /// Flatten the window to silence. Used on pause/stop so the idle trace
    /// is a flat center line instead of the last frozen waveform.
    pub fn flatten(&mut self) {
        if self.primed {
            let n = self.samples.len().max(1);
            self.samples.clear();
            self.samples.extend(std::iter::repeat_n(0.0, n));
        }
    }

    /// Byte-domain view of the window, or `None` before the tap ever ran.
    pub fn snapshot_bytes(&self) -> Option<Vec<u8>> {
        if !self.primed {
            return None;
        }
        Some(
            self.samples
                .iter()
                .map(|&s| ((s.clamp(-1.0, 1.0) * 128.0) + 128.0).clamp(0.0, 255.0) as u8)
                .collect(),
        )
    }
}

pub type ScopeHandle = Arc<Mutex<Scope>>;

/// Shared handle used by the tap (writer) and the render loop (reader).
pub fn scope_handle() -> ScopeHandle {
    Arc::new(Mutex::new(Scope::new(SCOPE_SAMPLES)))
}

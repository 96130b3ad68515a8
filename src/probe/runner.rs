use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use lofty::prelude::*;
use reqwest::blocking::Client;

use crate::audio::{suffix_for, Spool, SpoolLedger};
use crate::config::Settings;
use crate::playlist::{Locator, Track};

/// Aggregate playlist length in whole seconds. `None` until a sweep
/// finishes.
pub type TotalHandle = Arc<Mutex<Option<u64>>>;

/// Walks the playlist once, probing each track for its duration, and
/// publishes the floored sum. Tracks are probed one at a time so a
/// remote source only ever sees a single extra request in flight.
pub struct Prober {
    client: Client,
    total: TotalHandle,
    generation: Arc<AtomicU64>,
    timeout: Duration,
    ledger: SpoolLedger,
}

impl Prober {
    pub fn new(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            total: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            timeout: Duration::from_millis(settings.probe.timeout_ms),
            ledger: SpoolLedger::new(),
        }
    }

    pub fn total_handle(&self) -> TotalHandle {
        Arc::clone(&self.total)
    }

    #[cfg(test)]
    pub(super) fn ledger(&self) -> SpoolLedger {
        self.ledger.clone()
    }

    /// Start a sweep over `tracks`. A newer sweep invalidates older ones:
    /// a stale sweep finishes its work but never writes the total.
    pub fn spawn(&self, tracks: Vec<Track>) {
        let sweep = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut total) = self.total.lock() {
            *total = None;
        }

        let client = self.client.clone();
        let total = Arc::clone(&self.total);
        let generation = Arc::clone(&self.generation);
        let timeout = self.timeout;
        let ledger = self.ledger.clone();

        thread::spawn(move || {
            let mut secs = Vec::with_capacity(tracks.len());
            for track in &tracks {
                secs.push(probe_one(&client, track, timeout, &ledger));
            }

            let sum = aggregate_secs(&secs);
            if publish_total(&generation, sweep, &total, sum) {
                log::info!("playlist total: {sum}s over {} tracks", tracks.len());
            } else {
                log::debug!("abandoning stale duration sweep");
            }
        });
    }
}

/// Probe a single track with a hard deadline. The work runs on its own
/// thread; on timeout the probe counts as unknown and the worker, whose
/// fetch shares the same deadline, winds down on its own shortly after,
/// releasing its spool.
fn probe_one(client: &Client, track: &Track, timeout: Duration, ledger: &SpoolLedger) -> Option<f64> {
    let (tx, rx) = mpsc::channel();
    let client = client.clone();
    let track_clone = track.clone();
    let ledger = ledger.clone();
    thread::spawn(move || {
        let _ = tx.send(probe_duration(&client, &track_clone, timeout, &ledger));
    });

    match rx.recv_timeout(timeout) {
        Ok(secs) => secs,
        Err(_) => {
            log::debug!("duration probe timed out for \"{}\"", track.name);
            None
        }
    }
}

fn probe_duration(
    client: &Client,
    track: &Track,
    deadline: Duration,
    ledger: &SpoolLedger,
) -> Option<f64> {
    match &track.locator {
        Locator::Local(path) => read_secs(path),
        Locator::Remote(url) => {
            // Per-request timeout capped at the probe deadline, so a
            // stalled fetch cannot keep the worker alive past the sweep.
            let bytes = client
                .get(url)
                .timeout(deadline)
                .send()
                .ok()?
                .bytes()
                .ok()?;
            // Short-lived spool, released as soon as lofty has read it.
            let spool = Spool::write(&bytes, &suffix_for(url), ledger).ok()?;
            read_secs(spool.path())
        }
    }
}

fn read_secs(path: &Path) -> Option<f64> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration().as_secs_f64())
}

/// Write the aggregate unless a newer sweep started since `sweep` was
/// issued. Returns whether the write happened.
pub(super) fn publish_total(
    generation: &AtomicU64,
    sweep: u64,
    total: &TotalHandle,
    sum: u64,
) -> bool {
    if generation.load(Ordering::SeqCst) != sweep {
        return false;
    }
    if let Ok(mut slot) = total.lock() {
        *slot = Some(sum);
        true
    } else {
        false
    }
}

/// Sum per-track durations into whole seconds. Unknown or degenerate
/// answers contribute nothing; the sum is floored, never rounded up.
pub(super) fn aggregate_secs(secs: &[Option<f64>]) -> u64 {
    secs.iter()
        .filter_map(|s| *s)
        .filter(|s| s.is_finite() && *s > 0.0)
        .sum::<f64>()
        .floor() as u64
}

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

/// What a ticker wake-up is for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Advance the waveform surface one animation frame.
    Frame,
    /// Re-read playback info and the probed total.
    Refresh,
}

/// A repeating task on its own thread, sending `tick` into the event
/// loop's channel every `period` until stopped or the receiver goes away.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(period: Duration, tick: Tick, tx: Sender<Tick>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(period);
                if tx.send(tick).is_err() {
                    break;
                }
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn ticker_emits_and_stops() {
        let (tx, rx) = mpsc::channel();
        let mut t = Ticker::spawn(Duration::from_millis(1), Tick::Frame, tx);
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(2)).unwrap(),
            Tick::Frame
        );
        t.stop();
        // Drain whatever was queued before the stop landed.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(20)).is_err());
    }
}

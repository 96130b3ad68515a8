use std::fs;
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tempfile::tempdir;

use crate::config::Settings;
use crate::playlist::{Locator, Track};

use super::runner::{aggregate_secs, publish_total};
use super::{Prober, TotalHandle};

#[test]
fn known_durations_sum_and_unknowns_count_as_zero() {
    assert_eq!(aggregate_secs(&[Some(30.0), Some(45.0), None]), 75);
}

#[test]
fn fractional_totals_are_floored() {
    assert_eq!(aggregate_secs(&[Some(10.6), Some(10.6)]), 21);
    assert_eq!(aggregate_secs(&[Some(0.9)]), 0);
}

#[test]
fn empty_playlist_totals_zero() {
    assert_eq!(aggregate_secs(&[]), 0);
}

#[test]
fn local_sweep_publishes_a_total_and_leaves_no_spools() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mp3");
    let b = dir.path().join("b.mp3");
    fs::write(&a, b"not a real mp3").unwrap();
    fs::write(&b, b"also not one").unwrap();

    let prober = Prober::new(reqwest::blocking::Client::new(), &Settings::default());
    let total = prober.total_handle();
    let ledger = prober.ledger();

    prober.spawn(vec![
        Track {
            name: "a".into(),
            locator: Locator::Local(a),
        },
        Track {
            name: "b".into(),
            locator: Locator::Local(b),
        },
    ]);

    let mut published = None;
    for _ in 0..250 {
        if let Some(t) = *total.lock().unwrap() {
            published = Some(t);
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }
    // Unreadable headers count as unknown, so the aggregate is zero.
    assert_eq!(published, Some(0));
    assert_eq!(ledger.alive(), 0);
}

#[test]
fn a_newer_sweep_retires_the_stale_aggregate() {
    let total: TotalHandle = Arc::new(Mutex::new(None));

    // Generation moved past sweep 1 while it was still probing.
    let generation = AtomicU64::new(2);
    assert!(!publish_total(&generation, 1, &total, 75));
    assert_eq!(*total.lock().unwrap(), None);

    assert!(publish_total(&generation, 2, &total, 75));
    assert_eq!(*total.lock().unwrap(), Some(75));
}

#[test]
fn degenerate_answers_are_skipped() {
    assert_eq!(
        aggregate_secs(&[Some(f64::NAN), Some(f64::INFINITY), Some(-5.0), Some(12.0)]),
        12
    );
}

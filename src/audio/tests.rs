use std::fs;

use super::bind::suffix_for;
use super::spool::{Spool, SpoolLedger};
use super::types::VolumeState;

#[test]
fn volume_initial_is_clamped() {
    let v = VolumeState::new(1.7);
    assert_eq!(v.volume(), 1.0);
    let v = VolumeState::new(-0.2);
    assert_eq!(v.volume(), 0.0);
}

#[test]
fn zero_initial_volume_reads_as_muted() {
    let v = VolumeState::new(0.0);
    assert!(v.indicates_muted());
    assert_eq!(v.effective(), 0.0);
}

#[test]
fn set_volume_records_last_positive_level() {
    let mut v = VolumeState::new(0.85);
    v.set_volume(0.4);
    v.set_volume(0.0);
    assert!(v.indicates_muted());
    v.toggle_mute();
    assert_eq!(v.volume(), 0.4);
    assert!(!v.indicates_muted());
}

#[test]
fn toggle_mute_round_trips_the_premute_volume() {
    let mut v = VolumeState::new(0.6);
    v.toggle_mute();
    assert!(v.indicates_muted());
    assert_eq!(v.effective(), 0.0);
    v.toggle_mute();
    assert_eq!(v.volume(), 0.6);
    assert_eq!(v.effective(), 0.6);
}

#[test]
fn unmuting_from_a_cold_zero_restores_the_default_level() {
    // Started silent, never had a positive level to go back to.
    let mut v = VolumeState::new(0.0);
    v.toggle_mute();
    assert_eq!(v.volume(), 0.85);
    assert!(!v.indicates_muted());
}

#[test]
fn repeated_mute_cycles_keep_the_same_restore_point() {
    let mut v = VolumeState::new(0.3);
    for _ in 0..5 {
        v.toggle_mute();
        v.toggle_mute();
    }
    assert_eq!(v.volume(), 0.3);
}

#[test]
fn spool_contents_round_trip() {
    let ledger = SpoolLedger::new();
    let spool = Spool::write(b"abc123", ".mp3", &ledger).unwrap();
    assert_eq!(fs::read(spool.path()).unwrap(), b"abc123");
    assert!(
        spool
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".mp3"))
    );
}

#[test]
fn ledger_counts_at_most_one_spool_across_switches() {
    let ledger = SpoolLedger::new();
    assert_eq!(ledger.alive(), 0);

    let mut held = Spool::write(&[0], ".ogg", &ledger).unwrap();
    assert_eq!(ledger.alive(), 1);
    for i in 1..4u8 {
        // Release before replace, same order the player switches tracks.
        drop(held);
        assert_eq!(ledger.alive(), 0);
        held = Spool::write(&[i], ".ogg", &ledger).unwrap();
        assert_eq!(ledger.alive(), 1);
    }
    drop(held);
    assert_eq!(ledger.alive(), 0);
}

#[test]
fn dropping_a_spool_removes_the_file() {
    let ledger = SpoolLedger::new();
    let spool = Spool::write(b"x", ".mp3", &ledger).unwrap();
    let path = spool.path().to_path_buf();
    assert!(path.exists());
    drop(spool);
    assert!(!path.exists());
}

#[test]
fn suffix_follows_the_url_extension() {
    assert_eq!(suffix_for("https://h/music/a.mp3"), ".mp3");
    assert_eq!(suffix_for("https://h/music/A.OGG"), ".ogg");
    assert_eq!(suffix_for("https://h/music/a.flac?t=123"), ".flac");
    assert_eq!(suffix_for("https://h/music/a.wav#frag"), ".wav");
}

#[test]
fn suffix_falls_back_when_the_url_has_no_extension() {
    assert_eq!(suffix_for("https://h/stream"), ".mp3");
    assert_eq!(suffix_for("https://h/music/track."), ".mp3");
}

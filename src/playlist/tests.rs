use super::*;
use std::path::PathBuf;

fn t(name: &str) -> Track {
    Track {
        name: name.into(),
        locator: Locator::Local(PathBuf::from(format!("{name}.mp3"))),
    }
}

fn playlist(n: usize) -> Playlist {
    let mut p = Playlist::new();
    p.load((0..n).map(|i| t(&format!("track-{i}"))).collect(), 0);
    p
}

#[test]
fn load_clamps_start_index_into_range() {
    let mut p = Playlist::new();
    p.load(vec![t("a"), t("b")], 99);
    assert_eq!(p.current(), 1);

    p.load(Vec::new(), 5);
    assert_eq!(p.current(), 0);
    assert!(p.is_empty());
}

#[test]
fn select_ignores_out_of_range() {
    let mut p = playlist(3);
    p.select(2);
    assert_eq!(p.current(), 2);
    p.select(3);
    assert_eq!(p.current(), 2);
}

#[test]
fn advance_forward_is_a_cyclic_permutation() {
    // Stepping forward N times from any start returns to the start.
    for n in 2..6 {
        for start in 0..n {
            let mut p = playlist(n);
            p.select(start);
            for _ in 0..n {
                let next = p.advance(Direction::Forward);
                p.select(next);
            }
            assert_eq!(p.current(), start, "n={n} start={start}");
        }
    }
}

#[test]
fn advance_back_wraps_at_zero() {
    let mut p = playlist(4);
    p.select(0);
    assert_eq!(p.advance(Direction::Back), 3);
    p.select(2);
    assert_eq!(p.advance(Direction::Back), 1);
}

#[test]
fn shuffled_advance_never_returns_current() {
    let mut p = playlist(5);
    p.toggle_shuffle();
    p.select(3);
    for _ in 0..200 {
        let next = p.advance(Direction::Forward);
        assert_ne!(next, 3);
        assert!(next < 5);
    }
    // Previous obeys the same rule.
    for _ in 0..200 {
        assert_ne!(p.advance(Direction::Back), 3);
    }
}

#[test]
fn advance_on_short_playlists_stays_put() {
    let mut single = playlist(1);
    assert_eq!(single.advance(Direction::Forward), 0);
    single.toggle_shuffle();
    assert_eq!(single.advance(Direction::Forward), 0);

    let empty = Playlist::new();
    assert_eq!(empty.advance(Direction::Forward), 0);
    assert_eq!(empty.advance(Direction::Back), 0);
}

#[test]
fn toggle_shuffle_keeps_current_index() {
    let mut p = playlist(4);
    p.select(2);
    p.toggle_shuffle();
    assert!(p.shuffle());
    assert_eq!(p.current(), 2);
    p.toggle_shuffle();
    assert!(!p.shuffle());
    assert_eq!(p.current(), 2);
}

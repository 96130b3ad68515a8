use std::path::PathBuf;

use rand::Rng;

/// Where a track's bytes come from. Exactly one variant per track; the two
/// places that care (binding and probing) match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Absolute URL of a remotely hosted file.
    Remote(String),
    /// Path of a file on the local filesystem.
    Local(PathBuf),
}

/// One playable item: a display name plus its locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub locator: Locator,
}

/// Direction for `Playlist::advance`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

impl Direction {
    fn delta(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Back => -1,
        }
    }
}

/// The ordered, mutable track collection plus current index and shuffle flag.
///
/// `current` is always a valid index while the list is non-empty, and 0 when
/// it is empty.
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
    shuffle: bool,
}

impl Playlist {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            current: 0,
            shuffle: false,
        }
    }

    /// Replace the track sequence and reset the current index.
    ///
    /// `start` comes from the source mode policy (random for remote mode,
    /// 0 for local mode) and is clamped into range.
    pub fn load(&mut self, tracks: Vec<Track>, start: usize) {
        self.tracks = tracks;
        self.current = if self.tracks.is_empty() {
            0
        } else {
            start.min(self.tracks.len() - 1)
        };
    }

    /// Set the current index if `i` is valid; out-of-range is a no-op.
    /// Does not start playback.
    pub fn select(&mut self, i: usize) {
        if i < self.tracks.len() {
            self.current = i;
        }
    }

    /// Compute the next index without changing `current`.
    ///
    /// Shuffle off: wrap-around step by one. Shuffle on with more than one
    /// track: a uniformly random index strictly different from `current`.
    /// One or zero tracks: `current` unchanged. Previous follows the same
    /// rule as next.
    pub fn advance(&self, dir: Direction) -> usize {
        let n = self.tracks.len();
        if n <= 1 {
            return self.current;
        }
        if self.shuffle {
            let mut rng = rand::rng();
            loop {
                let next = rng.random_range(0..n);
                if next != self.current {
                    return next;
                }
            }
        }
        ((self.current as i64 + dir.delta() + n as i64) % n as i64) as usize
    }

    /// Flip the shuffle flag. `current` is untouched.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn get(&self, i: usize) -> Option<&Track> {
        self.tracks.get(i)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

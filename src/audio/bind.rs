//! Locator resolution: turn a `Track` into decodable bytes on disk and a
//! paused `Sink` reading them through the scope tap.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use lofty::prelude::*;
use reqwest::blocking::Client;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::playlist::{Locator, Track};
use crate::wave::ScopeHandle;

use super::spool::{Spool, SpoolLedger};
use super::tap::Tap;

/// Resolves locators. Remote bytes go through the shared HTTP client into
/// a spool accounted for by the ledger.
pub struct Binder {
    client: Client,
    ledger: SpoolLedger,
}

impl Binder {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            ledger: SpoolLedger::new(),
        }
    }

    /// Resolve `track` to a decodable local path. The returned binding owns
    /// the spool when one was needed, so dropping the binding releases it.
    pub fn bind(&self, track: &Track) -> Result<Binding, Box<dyn Error>> {
        let (path, spool) = match &track.locator {
            Locator::Local(path) => (path.clone(), None),
            Locator::Remote(url) => {
                log::debug!("fetching {url}");
                let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
                let spool = Spool::write(&bytes, &suffix_for(url), &self.ledger)?;
                (spool.path().to_path_buf(), Some(spool))
            }
        };

        // Track duration read up front; an unreadable header just leaves it
        // unknown (seeking becomes a no-op, display shows 0:00).
        let duration = lofty::read_from_path(&path)
            .ok()
            .map(|tagged| tagged.properties().duration());

        Ok(Binding {
            path,
            _spool: spool,
            duration,
        })
    }
}

/// A bound track: local path, optional owning spool, probed duration.
pub struct Binding {
    path: PathBuf,
    _spool: Option<Spool>,
    pub duration: Option<Duration>,
}

impl Binding {
    /// Create a paused `Sink` for this binding starting at `start_at`,
    /// with the scope tap spliced in front of the mixer.
    pub fn sink_at(
        &self,
        stream: &OutputStream,
        scope: &ScopeHandle,
        start_at: Duration,
    ) -> Result<Sink, Box<dyn Error>> {
        let file = File::open(&self.path)?;
        let source = Decoder::new(BufReader::new(file))?.skip_duration(start_at);

        let sink = Sink::connect_new(stream.mixer());
        sink.append(Tap::new(source, scope.clone()));
        sink.pause();
        Ok(sink)
    }
}

/// Extension suffix for a spooled URL, so format guessing keeps working.
pub(crate) fn suffix_for(url: &str) -> String {
    let tail = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .rsplit('/')
        .next()
        .unwrap_or(url);
    match tail.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => ".mp3".to_string(),
    }
}

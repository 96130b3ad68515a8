//! Transient byte spools for tracks that are not directly decodable from
//! disk, plus the ledger that counts live handles.
//!
//! A `Spool` is the transient resource handle of the player: the backing
//! temp file is deleted the moment the handle drops. The controller holds
//! at most one; probes create their own short-lived ones.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::NamedTempFile;

/// Shared counter of live spool handles.
#[derive(Clone)]
pub struct SpoolLedger(Arc<AtomicUsize>);

impl SpoolLedger {
    pub fn new() -> Self {
        Self(Arc::new(AtomicUsize::new(0)))
    }

    /// Number of spools currently alive.
    pub fn alive(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for SpoolLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// A temp file holding one track's bytes; released (file deleted) on drop.
pub struct Spool {
    file: NamedTempFile,
    ledger: Arc<AtomicUsize>,
}

impl Spool {
    /// Spool `bytes` into a fresh temp file. `suffix` keeps the source
    /// extension so decoders can guess the format from the path.
    pub fn write(bytes: &[u8], suffix: &str, ledger: &SpoolLedger) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("ghostwave-")
            .suffix(suffix)
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        ledger.0.fetch_add(1, Ordering::SeqCst);
        Ok(Self {
            file,
            ledger: ledger.0.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for Spool {
    fn drop(&mut self) {
        self.ledger.fetch_sub(1, Ordering::SeqCst);
    }
}

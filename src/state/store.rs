//! # State Store
//!
//! JSON-file-per-tick persistence for placement records. A record is written
//! once when a flag is planted and read once when that tick is verified,
//! possibly by a different process, so the store must survive restarts.
//!
//! There is no locking: every tick has exactly one writer (place) and one
//! reader (verify), and different ticks never share a file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Everything the verifier needs to re-check a planted flag.
///
/// Created at place time, immutable afterwards. The password is the gallery's
/// shared access credential; `sha256_hex` is the pixel fingerprint the
/// decrypted flag image must still match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Remote gallery the flag image lives in.
    pub gallery_name: String,
    /// File name of the flag image inside the gallery.
    pub file_name: String,
    /// Gallery access credential needed for the decrypt endpoint.
    pub password: String,
    /// Expected pixel fingerprint, lowercase hex SHA-256.
    pub sha256_hex: String,
}

/// Filesystem-backed store keyed by tick number.
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Persist the record for `tick`, replacing any previous record for the
    /// same tick. Only one placement per tick is expected; last write wins.
    pub fn put(&self, tick: u64, record: &PlacementRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.record_path(tick), json)?;
        Ok(())
    }

    /// Load the record for `tick`.
    ///
    /// # Returns
    /// - `Ok(Some(record))`: A placement was committed for this tick
    /// - `Ok(None)`: No record exists, indistinguishable from a placement
    ///   that never got as far as writing state
    /// - `Err`: I/O failure or a corrupt record file
    pub fn get(&self, tick: u64) -> Result<Option<PlacementRecord>> {
        match fs::read_to_string(self.record_path(tick)) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn record_path(&self, tick: u64) -> PathBuf {
        self.dir.join(format!("tick_{}.json", tick))
    }
}

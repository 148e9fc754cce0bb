//! File-based theater cache at ~/.cache/showtimes/theaters.json.
//!
//! No TTL: once written, the file is trusted until someone deletes it.
//! Format: a bare JSON array of theaters.

use super::types::Theater;
use crate::error::TheaterError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CACHE_FILE: &str = "theaters.json";

/// The theater cache.
pub struct TheaterCache {
    path: PathBuf,
}

impl TheaterCache {
    /// Cache stored as `theaters.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CACHE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and parse the cache file. Always goes to disk.
    pub fn read(&self) -> Result<Vec<Theater>, TheaterError> {
        let data = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&data).map_err(|source| TheaterError::CacheFormat {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the cache file with `theaters`.
    ///
    /// Writes a sibling temp file and renames it into place, so readers see
    /// either the old list or the new one.
    pub fn write(&self, theaters: &[Theater]) -> Result<(), TheaterError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string(theaters).map_err(|source| TheaterError::CacheFormat {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_error(e)
        })
    }

    /// Return the cached list, or build it with `rebuild` and persist it.
    ///
    /// On rebuild failure nothing is written and the error is returned, so
    /// the next call starts over.
    pub fn load_or_rebuild<F>(&self, rebuild: F) -> Result<Vec<Theater>, TheaterError>
    where
        F: FnOnce() -> Result<Vec<Theater>, TheaterError>,
    {
        if self.exists() {
            tracing::debug!(path = %self.path.display(), "Theater cache hit");
            return self.read();
        }

        tracing::info!(path = %self.path.display(), "Rebuilding theater cache, this can take a while");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let theaters = rebuild()?;
        self.write(&theaters)?;
        tracing::info!(theaters = theaters.len(), "Theater cache rebuilt");
        Ok(theaters)
    }

    /// Delete the cache file so the next load rebuilds it.
    pub fn clear(&self) -> Result<(), TheaterError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: io::Error) -> TheaterError {
        TheaterError::CacheIo {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn sample() -> Vec<Theater> {
        vec![
            Theater::new("C0013", "Le Grand Rex", 48.8706, 2.3477),
            Theater::new("C0071", "MK2 Bastille", 48.8533, 2.3691),
            Theater::new("P0005", "Le Champo – Espace Jacques Tati", 48.8503, 2.3433),
        ]
    }

    #[test]
    fn test_round_trip_preserves_values_and_order() {
        let dir = TempDir::new().unwrap();
        let cache = TheaterCache::in_dir(dir.path());
        cache.write(&sample()).unwrap();
        assert_eq!(cache.read().unwrap(), sample());
    }

    #[test]
    fn test_file_is_bare_array() {
        let dir = TempDir::new().unwrap();
        let cache = TheaterCache::in_dir(dir.path());
        cache.write(&sample()[..1]).unwrap();

        let raw = fs::read_to_string(cache.path()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            v,
            serde_json::json!([{"id": "C0013", "name": "Le Grand Rex", "latitude": 48.8706, "longitude": 2.3477}])
        );
        assert!(!cache.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_miss_rebuilds_once_then_hits() {
        let dir = TempDir::new().unwrap();
        // Nested directory that doesn't exist yet
        let cache = TheaterCache::in_dir(dir.path().join(".cache").join("showtimes"));
        let rebuilds = Cell::new(0);

        let first = cache
            .load_or_rebuild(|| {
                rebuilds.set(rebuilds.get() + 1);
                Ok(sample())
            })
            .unwrap();
        assert!(cache.exists());

        let second = cache
            .load_or_rebuild(|| {
                rebuilds.set(rebuilds.get() + 1);
                Ok(vec![])
            })
            .unwrap();

        assert_eq!(rebuilds.get(), 1);
        assert_eq!(first, sample());
        assert_eq!(second, first);
    }

    #[test]
    fn test_failed_rebuild_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let cache = TheaterCache::in_dir(dir.path());

        let result = cache.load_or_rebuild(|| {
            Err(TheaterError::Network {
                url: "http://cine.test/salle/".into(),
                message: "timed out".into(),
            })
        });
        assert!(matches!(result, Err(TheaterError::Network { .. })));
        assert!(!cache.exists());

        // Next call starts from scratch
        let theaters = cache.load_or_rebuild(|| Ok(sample())).unwrap();
        assert_eq!(theaters.len(), 3);
    }

    #[test]
    fn test_reads_fresh_bytes_each_time() {
        let dir = TempDir::new().unwrap();
        let cache = TheaterCache::in_dir(dir.path());
        cache.write(&sample()).unwrap();
        assert_eq!(cache.load_or_rebuild(|| Ok(vec![])).unwrap().len(), 3);

        cache.write(&sample()[..1]).unwrap();
        assert_eq!(cache.load_or_rebuild(|| Ok(vec![])).unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let cache = TheaterCache::in_dir(dir.path());
        fs::write(cache.path(), r#"{"theaters": []}"#).unwrap();

        let result = cache.load_or_rebuild(|| Ok(sample()));
        assert!(matches!(result, Err(TheaterError::CacheFormat { .. })));
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let cache = TheaterCache::in_dir(dir.path());
        cache.clear().unwrap();

        cache.write(&sample()).unwrap();
        cache.clear().unwrap();
        assert!(!cache.exists());
    }
}

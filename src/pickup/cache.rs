//! Shared coordinate cache for pickup points.

use anyhow::{Context, Result};
use hashbrown::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tempfile::TempDir;
use tracing::warn;

use crate::models::GeoPoint;

/// Process-wide key (pickup-point code) → coordinate store, seeded lazily
/// and never invalidated by this core.
///
/// Values for a fixed key are deterministic, so racing writers are
/// harmless; last write wins.
pub trait CoordinateStore: Send + Sync {
    fn get(&self, code: &str) -> Option<GeoPoint>;
    fn put(&self, code: &str, coordinate: GeoPoint);
}

/// In-memory store, the default for tests and short-lived processes.
#[derive(Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, GeoPoint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CoordinateStore for MemoryStore {
    fn get(&self, code: &str) -> Option<GeoPoint> {
        self.map.read().ok()?.get(code).copied()
    }

    fn put(&self, code: &str, coordinate: GeoPoint) {
        if let Ok(mut map) = self.map.write() {
            map.insert(code.to_string(), coordinate);
        }
    }
}

/// Sled-backed store for reuse across process restarts.
///
/// A coordinate is stored as 16 big-endian bytes: lon f64 followed by
/// lat f64.
pub struct SledStore {
    db: sled::Db,
    _tmp: Option<TempDir>,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).context("Failed to open coordinate cache")?;
        Ok(Self { db, _tmp: None })
    }

    /// Store under a temporary directory removed on drop.
    pub fn temporary() -> Result<Self> {
        let tmp = tempfile::Builder::new()
            .prefix("dovoz-geo-")
            .tempdir()
            .context("Failed to create cache directory")?;
        let db = sled::open(tmp.path()).context("Failed to open coordinate cache")?;
        Ok(Self {
            db,
            _tmp: Some(tmp),
        })
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush().context("Failed to flush coordinate cache")?;
        Ok(())
    }
}

impl CoordinateStore for SledStore {
    fn get(&self, code: &str) -> Option<GeoPoint> {
        let bytes = self.db.get(code.as_bytes()).ok().flatten()?;
        if bytes.len() != 16 {
            return None;
        }
        let lon = f64::from_be_bytes(bytes[0..8].try_into().ok()?);
        let lat = f64::from_be_bytes(bytes[8..16].try_into().ok()?);
        Some(GeoPoint::new(lat, lon))
    }

    fn put(&self, code: &str, coordinate: GeoPoint) {
        let mut value = [0u8; 16];
        value[0..8].copy_from_slice(&coordinate.lon.to_be_bytes());
        value[8..16].copy_from_slice(&coordinate.lat.to_be_bytes());
        if let Err(e) = self.db.insert(code.as_bytes(), &value) {
            warn!("Failed to cache coordinate for {}: {}", code, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("pp-1").is_none());

        store.put("pp-1", GeoPoint::new(55.75, 37.61));
        assert_eq!(store.get("pp-1"), Some(GeoPoint::new(55.75, 37.61)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.put("pp-1", GeoPoint::new(1.0, 1.0));
        store.put("pp-1", GeoPoint::new(2.0, 2.0));
        assert_eq!(store.get("pp-1"), Some(GeoPoint::new(2.0, 2.0)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sled_store_round_trip() {
        let store = SledStore::temporary().unwrap();
        assert!(store.get("pp-9").is_none());

        store.put("pp-9", GeoPoint::new(55.7558, 37.6173));
        assert_eq!(store.get("pp-9"), Some(GeoPoint::new(55.7558, 37.6173)));
        store.flush().unwrap();
    }
}

use super::{DamageOracle, DamageRange, DamageRequest, OracleError};
use fnv::FnvHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use tracing::debug;

/// Memoizes exact repeat queries. Only successful answers are stored, and
/// once `capacity` entries are held new answers are passed through uncached.
pub struct CachedOracle<O> {
    inner: O,
    capacity: usize,
    entries: RwLock<FnvHashMap<DamageRequest, DamageRange>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<O: DamageOracle> CachedOracle<O> {
    pub fn new(inner: O, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            entries: RwLock::new(FnvHashMap::default()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<O: DamageOracle> DamageOracle for CachedOracle<O> {
    fn evaluate(&self, request: &DamageRequest) -> Result<DamageRange, OracleError> {
        if let Ok(map) = self.entries.read() {
            if let Some(range) = map.get(request) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(*range);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let range = self.inner.evaluate(request)?;

        if let Ok(mut map) = self.entries.write() {
            if map.len() < self.capacity {
                map.insert(request.clone(), range);
                if map.len() == self.capacity {
                    debug!("Damage cache full ({} entries)", self.capacity);
                }
            }
        }
        Ok(range)
    }
}

//! Vector index facade
//!
//! Wraps the similarity-search backend behind a single owned handle. The
//! handle lives behind a `parking_lot::Mutex`, so a cleanup racing a search
//! serializes; the loser observes either the old backend or `InvalidState`.
//! `None` is the null sentinel: no live native object.

pub mod flat;

pub use flat::FlatIndex;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Facade, Result};

/// One nearest-neighbor hit: insertion-order id and squared L2 distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub distance: f32,
}

/// Contract for similarity-search backends.
///
/// `FlatIndex` implements the exhaustive flat-L2 contract in-tree; a linked
/// native index binding plugs in through the same seam.
pub trait IndexBackend: Send {
    fn add(&mut self, embedding: &[f32]) -> Result<()>;
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>>;
    fn save(&self, path: &Path) -> Result<()>;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn dimension(&self) -> usize;
}

/// Facade over one similarity-search index.
pub struct VectorIndex {
    backend: Mutex<Option<Box<dyn IndexBackend>>>,
}

impl VectorIndex {
    /// New facade with no live index.
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(None),
        }
    }

    /// Create a fresh flat-L2 index of the given dimension, replacing any
    /// live index.
    pub fn create(&self, dimension: usize) -> Result<()> {
        if dimension == 0 {
            return Err(Error::invalid_argument(
                Facade::Index,
                "dimension must be positive",
            ));
        }
        let mut guard = self.backend.lock();
        *guard = Some(Box::new(FlatIndex::new(dimension)));
        debug!(dimension, "created flat index");
        Ok(())
    }

    /// Load an index from disk, replacing any live index.
    pub fn load(&self, path: &Path) -> Result<()> {
        let loaded = FlatIndex::load(path)?;
        let mut guard = self.backend.lock();
        debug!(path = %path.display(), vectors = loaded.len(), "loaded index");
        *guard = Some(Box::new(loaded));
        Ok(())
    }

    /// Persist the live index.
    pub fn save(&self, path: &Path) -> Result<()> {
        let guard = self.backend.lock();
        let backend = guard
            .as_ref()
            .ok_or_else(|| Error::invalid_state(Facade::Index))?;
        backend.save(path)
    }

    /// Append one embedding. Element order and count are forwarded exactly.
    pub fn add_embedding(&self, embedding: &[f32]) -> Result<()> {
        if embedding.is_empty() {
            return Err(Error::invalid_argument(Facade::Index, "empty embedding"));
        }
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Index))?;
        backend.add(embedding)
    }

    /// Nearest neighbors of `query`: at most `k` hits, non-decreasing distance.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.is_empty() {
            return Err(Error::invalid_argument(Facade::Index, "empty query"));
        }
        if k == 0 {
            return Err(Error::invalid_argument(Facade::Index, "k must be positive"));
        }
        let guard = self.backend.lock();
        let backend = guard
            .as_ref()
            .ok_or_else(|| Error::invalid_state(Facade::Index))?;
        backend.search(query, k)
    }

    /// Drop all vectors but keep the index alive.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Index))?;
        backend.clear();
        Ok(())
    }

    /// Number of stored vectors.
    pub fn len(&self) -> Result<usize> {
        let guard = self.backend.lock();
        let backend = guard
            .as_ref()
            .ok_or_else(|| Error::invalid_state(Facade::Index))?;
        Ok(backend.len())
    }

    /// Whether a live index exists at all.
    pub fn is_initialized(&self) -> bool {
        self.backend.lock().is_some()
    }

    /// Release the index. Idempotent; a no-op when nothing is held.
    pub fn cleanup(&self) {
        let mut guard = self.backend.lock();
        if guard.take().is_some() {
            debug!("released index");
        }
    }
}

impl Default for VectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(dim: usize, axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; dim];
        v[axis] = 1.0;
        v
    }

    #[test]
    fn operations_before_create_fail_invalid_state() {
        let index = VectorIndex::new();
        assert!(matches!(
            index.add_embedding(&[1.0, 0.0]),
            Err(Error::InvalidState { facade: Facade::Index })
        ));
        assert!(matches!(
            index.search(&[1.0, 0.0], 3),
            Err(Error::InvalidState { facade: Facade::Index })
        ));
        assert!(matches!(
            index.len(),
            Err(Error::InvalidState { facade: Facade::Index })
        ));
        assert!(matches!(
            index.clear(),
            Err(Error::InvalidState { facade: Facade::Index })
        ));
    }

    #[test]
    fn cleanup_is_idempotent() {
        let index = VectorIndex::new();
        index.cleanup();
        index.create(4).unwrap();
        assert!(index.is_initialized());
        index.cleanup();
        index.cleanup();
        assert!(!index.is_initialized());
        assert!(matches!(index.len(), Err(Error::InvalidState { .. })));
    }

    #[test]
    fn create_replaces_live_index() {
        let index = VectorIndex::new();
        index.create(2).unwrap();
        index.add_embedding(&[1.0, 0.0]).unwrap();
        assert_eq!(index.len().unwrap(), 1);

        index.create(2).unwrap();
        assert_eq!(index.len().unwrap(), 0);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let index = VectorIndex::new();
        index.create(2).unwrap();
        assert!(matches!(
            index.add_embedding(&[]),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            index.search(&[], 1),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            index.search(&[1.0, 0.0], 0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(index.create(0), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn search_orders_by_distance_and_caps_at_k() {
        let index = VectorIndex::new();
        index.create(3).unwrap();
        for axis in 0..3 {
            index.add_embedding(&unit(3, axis)).unwrap();
        }

        let hits = index.search(&unit(3, 1), 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 1);
        assert!(hits[0].distance <= hits[1].distance);

        // k larger than the index size returns everything, still ordered.
        let hits = index.search(&unit(3, 0), 10).unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn save_load_round_trip_preserves_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        let index = VectorIndex::new();
        index.create(4).unwrap();
        for axis in 0..4 {
            index.add_embedding(&unit(4, axis)).unwrap();
        }
        index.save(&path).unwrap();
        let size_before = index.len().unwrap();
        index.cleanup();

        let restored = VectorIndex::new();
        restored.load(&path).unwrap();
        assert_eq!(restored.len().unwrap(), size_before);

        let hits = restored.search(&unit(4, 2), 1).unwrap();
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn save_before_create_fails_invalid_state() {
        let dir = tempfile::tempdir().unwrap();
        let index = VectorIndex::new();
        assert!(matches!(
            index.save(&dir.path().join("index.json")),
            Err(Error::InvalidState { .. })
        ));
    }
}

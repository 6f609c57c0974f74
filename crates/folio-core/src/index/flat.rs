//! Exhaustive flat-L2 index backend
//!
//! Matches the contract of a flat similarity-search index: vectors are stored
//! in insertion order, ids are insertion positions, and search scans every
//! vector. Persistence is a JSON document carrying the dimension and the raw
//! vectors.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{Error, Facade, Result};
use crate::index::{IndexBackend, SearchHit};

#[derive(Debug, Serialize, Deserialize)]
struct FlatIndexFile {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

/// In-memory flat index with exhaustive L2 search.
#[derive(Debug)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Read an index previously written by [`IndexBackend::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::native(Facade::Index, format!("failed to open index: {}", e)))?;
        let parsed: FlatIndexFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::native(Facade::Index, format!("failed to parse index: {}", e)))?;

        if parsed.dimension == 0 {
            return Err(Error::native(Facade::Index, "index file has zero dimension"));
        }
        if let Some(bad) = parsed.vectors.iter().find(|v| v.len() != parsed.dimension) {
            return Err(Error::native(
                Facade::Index,
                format!(
                    "index file is corrupt: vector of length {} in a {}-dimensional index",
                    bad.len(),
                    parsed.dimension
                ),
            ));
        }

        Ok(Self {
            dimension: parsed.dimension,
            vectors: parsed.vectors,
        })
    }

    fn check_dimension(&self, len: usize, what: &str) -> Result<()> {
        if len != self.dimension {
            return Err(Error::invalid_argument(
                Facade::Index,
                format!(
                    "{} has {} elements, index dimension is {}",
                    what, len, self.dimension
                ),
            ));
        }
        Ok(())
    }
}

impl IndexBackend for FlatIndex {
    fn add(&mut self, embedding: &[f32]) -> Result<()> {
        self.check_dimension(embedding.len(), "embedding")?;
        self.vectors.push(embedding.to_vec());
        Ok(())
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        self.check_dimension(query.len(), "query")?;

        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(id, vector)| {
                let distance = vector
                    .iter()
                    .zip(query)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f32>();
                SearchHit {
                    id: id as i64,
                    distance,
                }
            })
            .collect();

        // Stable tie-break on id keeps results deterministic.
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        hits.truncate(k);
        Ok(hits)
    }

    fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::native(Facade::Index, format!("failed to create index: {}", e)))?;
        let contents = FlatIndexFile {
            dimension: self.dimension,
            vectors: self.vectors.clone(),
        };
        serde_json::to_writer(BufWriter::new(file), &contents)
            .map_err(|e| Error::native(Facade::Index, format!("failed to write index: {}", e)))?;
        Ok(())
    }

    fn clear(&mut self) {
        self.vectors.clear();
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_element_order_and_count() {
        let mut index = FlatIndex::new(3);
        let embedding = vec![0.1f32, -0.2, 0.3];
        index.add(&embedding).unwrap();
        assert_eq!(index.vectors[0], embedding);
    }

    #[test]
    fn dimension_mismatch_is_invalid_argument() {
        let mut index = FlatIndex::new(3);
        assert!(matches!(
            index.add(&[1.0, 2.0]),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            index.search(&[1.0], 1),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn search_on_empty_index_returns_no_hits() {
        let index = FlatIndex::new(2);
        assert!(index.search(&[0.0, 0.0], 5).unwrap().is_empty());
    }

    #[test]
    fn nearest_vector_comes_first() {
        let mut index = FlatIndex::new(2);
        index.add(&[10.0, 10.0]).unwrap();
        index.add(&[0.0, 0.1]).unwrap();
        index.add(&[5.0, 5.0]).unwrap();

        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[1].id, 2);
        assert_eq!(hits[2].id, 0);
    }

    #[test]
    fn ties_break_on_insertion_order() {
        let mut index = FlatIndex::new(1);
        index.add(&[1.0]).unwrap();
        index.add(&[-1.0]).unwrap();

        let hits = index.search(&[0.0], 2).unwrap();
        assert_eq!(hits[0].id, 0);
        assert_eq!(hits[1].id, 1);
    }

    #[test]
    fn clear_keeps_dimension() {
        let mut index = FlatIndex::new(2);
        index.add(&[1.0, 2.0]).unwrap();
        index.clear();
        assert_eq!(index.len(), 0);
        assert_eq!(index.dimension(), 2);
    }

    #[test]
    fn corrupt_file_is_native_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"dimension":2,"vectors":[[1.0]]}"#).unwrap();
        assert!(matches!(
            FlatIndex::load(&path),
            Err(Error::Native { facade: Facade::Index, .. })
        ));
    }
}

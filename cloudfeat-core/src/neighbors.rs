//! CSR-style neighbor adjacency view

use crate::error::{Error, Result};

/// A read-only view over a precomputed neighbor adjacency in compressed
/// (CSR-style) layout: `offsets[i]..offsets[i + 1]` delimits point `i`'s
/// neighbor indices inside the flat `indices` buffer.
///
/// How the adjacency was produced (k-nearest, radius search, ...) is the
/// caller's business; a point's own index may or may not appear in its
/// neighbor list. All structural invariants are validated once at
/// construction:
///
/// * `offsets` is non-empty, starts at 0, and is non-decreasing;
/// * the last offset equals `indices.len()`;
/// * every neighbor index addresses a valid point (`< n_points`).
#[derive(Debug, Clone, Copy)]
pub struct NeighborIndex<'a> {
    indices: &'a [u32],
    offsets: &'a [u32],
}

impl<'a> NeighborIndex<'a> {
    /// Create a validated view over `indices` and `offsets` for a cloud of
    /// `n_points` points. `offsets` must have length `n_points + 1`.
    pub fn new(indices: &'a [u32], offsets: &'a [u32], n_points: usize) -> Result<Self> {
        if offsets.len() != n_points + 1 {
            return Err(Error::InvalidData(format!(
                "offset buffer has length {}, expected {}",
                offsets.len(),
                n_points + 1
            )));
        }
        if offsets[0] != 0 {
            return Err(Error::InvalidData(format!(
                "offsets must start at 0, found {}",
                offsets[0]
            )));
        }
        if offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidData(
                "offsets must be non-decreasing".to_string(),
            ));
        }
        if offsets[n_points] as usize != indices.len() {
            return Err(Error::InvalidData(format!(
                "last offset {} does not match neighbor buffer length {}",
                offsets[n_points],
                indices.len()
            )));
        }
        if indices.iter().any(|&idx| idx as usize >= n_points) {
            return Err(Error::InvalidData(format!(
                "neighbor index out of range (n_points = {})",
                n_points
            )));
        }
        Ok(Self { indices, offsets })
    }

    /// Get the number of points covered by this index
    pub fn n_points(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Get the number of neighbors recorded for point `index`
    pub fn neighbor_count(&self, index: usize) -> usize {
        (self.offsets[index + 1] - self.offsets[index]) as usize
    }

    /// Get the neighbor indices of point `index`, in their stored order
    pub fn neighbors(&self, index: usize) -> &'a [u32] {
        let start = self.offsets[index] as usize;
        let end = self.offsets[index + 1] as usize;
        &self.indices[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_index() {
        let indices = [1, 2, 0, 2, 0];
        let offsets = [0, 2, 4, 5];
        let index = NeighborIndex::new(&indices, &offsets, 3).unwrap();
        assert_eq!(index.n_points(), 3);
        assert_eq!(index.neighbor_count(0), 2);
        assert_eq!(index.neighbors(1), &[0, 2]);
        assert_eq!(index.neighbors(2), &[0]);
    }

    #[test]
    fn test_empty_neighbor_list_allowed() {
        let indices = [1];
        let offsets = [0, 0, 1];
        let index = NeighborIndex::new(&indices, &offsets, 2).unwrap();
        assert_eq!(index.neighbor_count(0), 0);
        assert_eq!(index.neighbors(0), &[] as &[u32]);
    }

    #[test]
    fn test_wrong_offset_length_rejected() {
        let indices = [0];
        let offsets = [0, 1];
        assert!(NeighborIndex::new(&indices, &offsets, 2).is_err());
    }

    #[test]
    fn test_decreasing_offsets_rejected() {
        let indices = [0, 1];
        let offsets = [0, 2, 1];
        assert!(NeighborIndex::new(&indices, &offsets, 2).is_err());
    }

    #[test]
    fn test_dangling_last_offset_rejected() {
        let indices = [0, 1];
        let offsets = [0, 1, 3];
        assert!(NeighborIndex::new(&indices, &offsets, 2).is_err());
    }

    #[test]
    fn test_out_of_range_neighbor_rejected() {
        let indices = [5];
        let offsets = [0, 1, 1];
        assert!(NeighborIndex::new(&indices, &offsets, 2).is_err());
    }
}

//! Read-only view over a flat point coordinate buffer

use crate::error::{Error, Result};
use crate::point::Point3f;

/// A read-only view over a flat buffer of interleaved `x, y, z` coordinates.
///
/// The view validates its length invariant (a multiple of 3) once at
/// construction, so per-point accesses never need to re-derive it. The
/// underlying buffer is owned by the caller and shared read-only across
/// all parallel point computations.
#[derive(Debug, Clone, Copy)]
pub struct PointCloudView<'a> {
    xyz: &'a [f32],
    len: usize,
}

impl<'a> PointCloudView<'a> {
    /// Create a view over `xyz`, which must hold `3 * n` coordinates.
    pub fn new(xyz: &'a [f32]) -> Result<Self> {
        if xyz.len() % 3 != 0 {
            return Err(Error::InvalidData(format!(
                "coordinate buffer length {} is not a multiple of 3",
                xyz.len()
            )));
        }
        Ok(Self {
            xyz,
            len: xyz.len() / 3,
        })
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the cloud is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the coordinates of point `index`.
    ///
    /// Panics if `index >= len()`.
    pub fn point(&self, index: usize) -> Point3f {
        let base = 3 * index;
        Point3f::new(self.xyz[base], self.xyz[base + 1], self.xyz[base + 2])
    }

    /// Get the underlying flat coordinate buffer
    pub fn as_slice(&self) -> &'a [f32] {
        self.xyz
    }
}

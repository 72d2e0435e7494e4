//! Per-point geometric feature vector

use crate::point::Vector3f;
use serde::{Deserialize, Serialize};

/// Number of floats in a packed per-point feature vector
pub const FEATURE_DIM: usize = 11;

/// The geometric descriptors computed for one point's neighborhood.
///
/// The packed layout (see [`GeometricFeatures::write_to`]) is, in order:
/// linearity, planarity, scattering, verticality, the three components of
/// the normal direction, length, surface, volume, curvature.
///
/// An all-zero vector is the sentinel for "insufficient neighbor support";
/// consumers must not read it as flat geometry (a genuinely flat
/// neighborhood scores planarity near 1 instead).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricFeatures {
    /// How 1D-distributed the neighborhood is, in [0, 1]
    pub linearity: f32,
    /// How 2D-distributed the neighborhood is, in [0, 1]
    pub planarity: f32,
    /// How 3D-distributed the neighborhood is, in [0, 1]
    pub scattering: f32,
    /// Alignment of the neighborhood's dominant orientations with the Z axis
    pub verticality: f32,
    /// Smallest-eigenvalue eigenvector; the normal direction for
    /// near-planar neighborhoods. Sign-normalized so `normal.z >= 0`.
    pub normal: Vector3f,
    /// Standard deviation along the principal direction
    pub length: f32,
    /// Geometric mean spread over the two principal directions
    pub surface: f32,
    /// Geometric mean spread over all three directions
    pub volume: f32,
    /// Share of the total spread carried by the smallest direction
    pub curvature: f32,
}

impl GeometricFeatures {
    /// The all-zero feature vector used for points with insufficient
    /// neighbor support
    pub fn zeros() -> Self {
        Self {
            linearity: 0.0,
            planarity: 0.0,
            scattering: 0.0,
            verticality: 0.0,
            normal: Vector3f::zeros(),
            length: 0.0,
            surface: 0.0,
            volume: 0.0,
            curvature: 0.0,
        }
    }

    /// Write the packed representation into `out`.
    ///
    /// Panics if `out.len() < FEATURE_DIM`.
    pub fn write_to(&self, out: &mut [f32]) {
        out[0] = self.linearity;
        out[1] = self.planarity;
        out[2] = self.scattering;
        out[3] = self.verticality;
        out[4] = self.normal.x;
        out[5] = self.normal.y;
        out[6] = self.normal.z;
        out[7] = self.length;
        out[8] = self.surface;
        out[9] = self.volume;
        out[10] = self.curvature;
    }

    /// Read a packed representation back into a typed record.
    ///
    /// Panics if `slice.len() < FEATURE_DIM`.
    pub fn from_slice(slice: &[f32]) -> Self {
        Self {
            linearity: slice[0],
            planarity: slice[1],
            scattering: slice[2],
            verticality: slice[3],
            normal: Vector3f::new(slice[4], slice[5], slice[6]),
            length: slice[7],
            surface: slice[8],
            volume: slice[9],
            curvature: slice[10],
        }
    }
}

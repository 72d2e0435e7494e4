//! # cloudfeat-core
//!
//! Core data structures for per-point geometric feature extraction.
//!
//! This crate provides the typed views over caller-owned flat buffers that
//! the feature kernel consumes (point coordinates and the CSR neighbor
//! index), the packed feature-vector type it produces, and the shared
//! error type.

pub mod cloud;
pub mod error;
pub mod features;
pub mod neighbors;
pub mod point;

// Re-export commonly used items
pub use cloud::PointCloudView;
pub use error::{Error, Result};
pub use features::{GeometricFeatures, FEATURE_DIM};
pub use neighbors::NeighborIndex;
pub use point::{Point3f, Vector3f};

//! # cloudfeat-features
//!
//! Per-point local geometric feature extraction for 3D point clouds.
//!
//! For every point, the kernel runs a principal component analysis of the
//! point's spatial neighborhood (optionally scanning several neighborhood
//! sizes and keeping the one with minimal eigenentropy) and derives an
//! 11-dimensional descriptor vector: linearity, planarity, scattering,
//! verticality, the normal direction, length, surface, volume and
//! curvature. Points are processed independently in parallel; each writes
//! to its own disjoint slice of the output buffer.
//!
//! Neighbor relationships are an input, supplied in CSR layout (see
//! [`NeighborIndex`]); this crate performs no neighbor search of its own.

pub mod descriptors;
pub mod pca;
pub mod search;

// Re-export commonly used items
pub use descriptors::derive_features;
pub use pca::{neighborhood_pca, NeighborhoodPca};
pub use search::{optimal_neighborhood_pca, FeaturesConfig};

use cloudfeat_core::{
    Error, GeometricFeatures, NeighborIndex, PointCloudView, Result, FEATURE_DIM,
};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How many processed points between progress reports
const PROGRESS_INTERVAL: usize = 10_000;

/// Compute geometric features for every point, writing the packed
/// 11-float vectors into `out_features`.
///
/// `out_features` must hold exactly `11 * n_points` floats. Each point's
/// slice is written exactly once: points whose neighbor count is below
/// `config.k_min` (or zero) receive the all-zero sentinel, every other
/// point receives its derived descriptors. The computation is a pure
/// function of the inputs, so repeated calls produce identical buffers
/// regardless of thread scheduling.
///
/// With `config.verbose` set, coarse progress is reported through
/// `log::info!`. The underlying counter is deliberately relaxed; the
/// reported percentage is approximate and nothing depends on it.
pub fn compute_features_into(
    cloud: &PointCloudView<'_>,
    index: &NeighborIndex<'_>,
    config: &FeaturesConfig,
    out_features: &mut [f32],
) -> Result<()> {
    let n_points = cloud.len();
    if index.n_points() != n_points {
        return Err(Error::InvalidData(format!(
            "neighbor index covers {} points, cloud has {}",
            index.n_points(),
            n_points
        )));
    }
    if out_features.len() != FEATURE_DIM * n_points {
        return Err(Error::InvalidData(format!(
            "output buffer has length {}, expected {}",
            out_features.len(),
            FEATURE_DIM * n_points
        )));
    }

    let progress = AtomicUsize::new(0);

    out_features
        .par_chunks_mut(FEATURE_DIM)
        .enumerate()
        .for_each(|(i_point, out_point)| {
            let neighbors = index.neighbors(i_point);
            let k_nn = neighbors.len();

            // Too little support for meaningful statistics: zero-fill.
            // Consumers read the all-zero vector as "undefined", not as
            // flat geometry
            if k_nn == 0 || k_nn < config.k_min {
                GeometricFeatures::zeros().write_to(out_point);
            } else {
                let (pca, _k) = optimal_neighborhood_pca(cloud, neighbors, config);
                derive_features(&pca).write_to(out_point);
            }

            if config.verbose {
                let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_INTERVAL == 0 {
                    log::info!("{}% done", done * 100 / n_points);
                }
            }
        });

    Ok(())
}

/// Compute geometric features for every point into a freshly allocated
/// buffer of `11 * n_points` floats, packed per point.
pub fn compute_features(
    cloud: &PointCloudView<'_>,
    index: &NeighborIndex<'_>,
    config: &FeaturesConfig,
) -> Result<Vec<f32>> {
    let mut out_features = vec![0.0; FEATURE_DIM * cloud.len()];
    compute_features_into(cloud, index, config, &mut out_features)?;
    Ok(out_features)
}

/// Flat-buffer entry point.
///
/// `xyz` holds `3 * n` interleaved coordinates, `neighbors` the flattened
/// neighbor indices, and `neighbor_offsets` the `n + 1` CSR offsets
/// delimiting each point's slice of `neighbors`. Buffer shapes and index
/// ranges are validated up front; past validation the kernel cannot fail.
pub fn compute_geometric_features(
    xyz: &[f32],
    neighbors: &[u32],
    neighbor_offsets: &[u32],
    out_features: &mut [f32],
    config: &FeaturesConfig,
) -> Result<()> {
    let cloud = PointCloudView::new(xyz)?;
    let index = NeighborIndex::new(neighbors, neighbor_offsets, cloud.len())?;
    compute_features_into(&cloud, &index, config, out_features)
}

//! Adaptive neighborhood size selection

use crate::pca::{neighborhood_pca, NeighborhoodPca};
use cloudfeat_core::PointCloudView;
use serde::{Deserialize, Serialize};

/// Configuration for the feature computation kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Minimum number of neighbors a point needs for its features to be
    /// computed at all; below this the output is the all-zero sentinel
    pub k_min: usize,
    /// Stride of the adaptive neighborhood search. `0` disables the
    /// search and uses each point's full neighbor list
    pub k_step: usize,
    /// Floor on the smallest neighborhood size considered during the
    /// search. Very small neighborhoods tend to score a low eigenentropy
    /// despite carrying noisy, unreliable geometry, so the scan does not
    /// start below this size. A value of 0 is treated as 1; a PCA needs
    /// at least one point
    pub k_min_search: usize,
    /// Report approximate progress via `log::info!`
    pub verbose: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            k_min: 1,
            k_step: 0,
            k_min_search: 10,
            verbose: false,
        }
    }
}

/// Select the neighborhood size minimizing eigenentropy and return its PCA
/// together with the chosen size.
///
/// With the search disabled (`k_step == 0`) the full neighbor list is used
/// and a single PCA is evaluated. Otherwise candidate sizes start at
/// `min(max(k_min, k_min_search), k_nn)` and advance by `k_step`, with
/// `k_nn` itself always evaluated even when it is not a multiple of the
/// stride. Comparison is strict, so an exact entropy tie keeps the
/// earlier (smaller) candidate.
pub fn optimal_neighborhood_pca(
    cloud: &PointCloudView<'_>,
    neighbors: &[u32],
    config: &FeaturesConfig,
) -> (NeighborhoodPca, usize) {
    let k_nn = neighbors.len();
    debug_assert!(k_nn >= 1);

    if config.k_step == 0 {
        return (neighborhood_pca(cloud, neighbors, k_nn), k_nn);
    }

    let k0 = config.k_min.max(config.k_min_search).min(k_nn).max(1);
    let mut best = neighborhood_pca(cloud, neighbors, k0);
    let mut best_k = k0;

    for k in (k0 + 1)..=k_nn {
        // Only evaluate every k_step-th size, plus the k_nn boundary
        if k % config.k_step != 0 && k != k_nn {
            continue;
        }
        let pca = neighborhood_pca(cloud, neighbors, k);
        if pca.eigenentropy < best.eigenentropy {
            best = pca;
            best_k = k;
        }
    }

    (best, best_k)
}

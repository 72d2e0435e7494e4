//! Local neighborhood PCA and eigenentropy

use cloudfeat_core::{Point3f, PointCloudView, Vector3f};
use nalgebra::Matrix3;

/// Stabilizer added to the eigenvalue sum and to logarithm arguments when
/// computing eigenentropy, so fully degenerate (collinear or coincident)
/// neighborhoods still yield a finite value. It biases the entropy slightly
/// but consistently; entropies are only ever compared against other values
/// computed with the same bias.
pub const ENTROPY_EPSILON: f32 = 1e-3;

/// Eigendecomposition of one neighborhood's covariance matrix.
///
/// Eigenvalues are sorted in decreasing order and clamped to be
/// non-negative (the covariance matrix is positive semi-definite, so
/// negative values can only be numerical noise). Each eigenvector is unit
/// length and expressed in the Z+ half-space, which removes the sign
/// ambiguity inherent to eigendecomposition and makes results comparable
/// across neighborhoods.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodPca {
    /// Eigenvalues `λ0 >= λ1 >= λ2 >= 0`
    pub eigenvalues: [f32; 3],
    /// Unit eigenvectors matching `eigenvalues`, each with `z >= 0`
    pub eigenvectors: [Vector3f; 3],
    /// Shannon-style entropy of the normalized eigenvalues; low values
    /// indicate a dominant linear or planar structure
    pub eigenentropy: f32,
}

/// Collect the coordinates of the first `k` entries of a point's neighbor
/// list.
///
/// `k` must be at least 1 and at most `neighbors.len()`; every neighbor
/// index must address a valid point of `cloud` (guaranteed when the list
/// comes from a validated [`cloudfeat_core::NeighborIndex`]).
pub fn gather_neighborhood(
    cloud: &PointCloudView<'_>,
    neighbors: &[u32],
    k: usize,
) -> Vec<Point3f> {
    neighbors[..k]
        .iter()
        .map(|&idx| cloud.point(idx as usize))
        .collect()
}

/// Compute the PCA of the neighborhood formed by the first `k` entries of
/// `neighbors`.
///
/// The covariance matrix is the centered second moment divided by `k`.
/// `k == 0` is a caller error.
pub fn neighborhood_pca(
    cloud: &PointCloudView<'_>,
    neighbors: &[u32],
    k: usize,
) -> NeighborhoodPca {
    debug_assert!(k >= 1 && k <= neighbors.len());
    let points = gather_neighborhood(cloud, neighbors, k);

    // Compute centroid
    let mut centroid = Vector3f::zeros();
    for point in &points {
        centroid += point.coords;
    }
    centroid /= k as f32;

    // Compute covariance matrix
    let mut covariance = Matrix3::zeros();
    for point in &points {
        let diff = point.coords - centroid;
        covariance += diff * diff.transpose();
    }
    covariance /= k as f32;

    // Find eigenvalues and eigenvectors
    let eigen = covariance.symmetric_eigen();

    let mut eigen_pairs: Vec<(f32, Vector3f)> = eigen
        .eigenvalues
        .iter()
        .zip(eigen.eigenvectors.column_iter())
        .map(|(val, vec)| (*val, vec.clone_owned()))
        .collect();

    // Sort by eigenvalue in descending order
    eigen_pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());

    let mut eigenvalues = [0.0f32; 3];
    let mut eigenvectors = [Vector3f::zeros(); 3];
    for (slot, (value, vector)) in eigen_pairs.into_iter().enumerate() {
        eigenvalues[slot] = value.max(0.0);
        // Standardize orientation: every eigenvector is expressed in the
        // Z+ half-space
        eigenvectors[slot] = if vector.z < 0.0 { -vector } else { vector };
    }

    let val_sum = eigenvalues[0] + eigenvalues[1] + eigenvalues[2] + ENTROPY_EPSILON;
    let eigenentropy = -eigenvalues
        .iter()
        .map(|&val| {
            let e = val / val_sum;
            e * (e + ENTROPY_EPSILON).ln()
        })
        .sum::<f32>();

    NeighborhoodPca {
        eigenvalues,
        eigenvectors,
        eigenentropy,
    }
}

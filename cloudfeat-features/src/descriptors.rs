//! Derivation of geometric descriptors from a neighborhood PCA

use crate::pca::NeighborhoodPca;
use cloudfeat_core::{GeometricFeatures, Vector3f};

/// Derive the per-point geometric descriptors from a neighborhood PCA.
///
/// Eigenvalues are homogeneous to squared length, so their square roots
/// are taken first; the descriptors are defined in linear units. The
/// additive stabilizers (1e-3, 1e-6, 1e-9) bound each quantity when the
/// underlying spread is exactly or nearly zero, so every branch is a total
/// function: no input produces a non-finite descriptor.
pub fn derive_features(pca: &NeighborhoodPca) -> GeometricFeatures {
    let [l0, l1, l2] = pca.eigenvalues;
    let a0 = l0.sqrt();
    let a1 = l1.sqrt();
    let a2 = l2.sqrt();

    let linearity = (a0 - a1) / (a0 + 1e-3);
    let planarity = (a1 - a2) / (a0 + 1e-3);
    let scattering = a2 / (a0 + 1e-3);
    let length = a0;
    let surface = (a0 * a1 + 1e-6).sqrt();
    let volume = (a0 * a1 * a2 + 1e-9).powf(1.0 / 3.0);
    let curvature = a2 / (a0 + a1 + a2 + 1e-3);

    // Verticality: eigenvalue-weighted average of absolute orientation.
    // A fully degenerate neighborhood (a0 == 0) has no orientation at all
    let mut verticality = 0.0;
    if a0 > 0.0 {
        let [v0, v1, v2] = pca.eigenvectors;
        let unary = Vector3f::new(
            l0 * v0.x.abs() + l1 * v1.x.abs() + l2 * v2.x.abs(),
            l0 * v0.y.abs() + l1 * v1.y.abs() + l2 * v2.y.abs(),
            l0 * v0.z.abs() + l1 * v1.z.abs() + l2 * v2.z.abs(),
        );
        verticality = unary.z / unary.norm();
    }

    GeometricFeatures {
        linearity,
        planarity,
        scattering,
        verticality,
        normal: pca.eigenvectors[2],
        length,
        surface,
        volume,
        curvature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pca::neighborhood_pca;
    use approx::assert_relative_eq;
    use cloudfeat_core::PointCloudView;

    fn flatten(points: &[[f32; 3]]) -> Vec<f32> {
        points.iter().flatten().copied().collect()
    }

    fn pca_of(points: &[[f32; 3]]) -> NeighborhoodPca {
        let xyz = flatten(points);
        let cloud = PointCloudView::new(&xyz).unwrap();
        let neighbors: Vec<u32> = (0..points.len() as u32).collect();
        neighborhood_pca(&cloud, &neighbors, points.len())
    }

    #[test]
    fn test_planar_patch_descriptors() {
        let mut points = Vec::new();
        for i in 0..6 {
            for j in 0..6 {
                points.push([i as f32, j as f32, 0.0]);
            }
        }
        let features = derive_features(&pca_of(&points));

        assert!(features.planarity > 0.95);
        assert!(features.linearity < 0.05);
        assert!(features.scattering < 0.05);
        // The normal of a horizontal plane is the Z axis, and its
        // orientations are all horizontal
        assert_relative_eq!(features.normal.z, 1.0, epsilon = 1e-4);
        assert!(features.verticality < 0.05);
        assert!(features.curvature < 0.05);
    }

    #[test]
    fn test_linear_patch_descriptors() {
        let points: Vec<[f32; 3]> = (0..12).map(|i| [i as f32, 0.5 * i as f32, 0.0]).collect();
        let features = derive_features(&pca_of(&points));

        assert!(features.linearity > 0.95);
        assert!(features.planarity < 0.05);
        assert!(features.scattering < 0.05);
        assert!(features.length > 3.0);
        // Cross-sectional spreads collapse; only the stabilizers and
        // eigensolver noise keep surface and volume above zero
        assert!(features.surface < 0.2);
        assert!(features.volume < 0.1);
    }

    #[test]
    fn test_vertical_line_has_full_verticality() {
        let points: Vec<[f32; 3]> = (0..10).map(|i| [0.0, 0.0, i as f32]).collect();
        let features = derive_features(&pca_of(&points));

        assert!(features.linearity > 0.95);
        assert_relative_eq!(features.verticality, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_isotropic_cluster_descriptors() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        let mut points = Vec::new();
        while points.len() < 3000 {
            let p = [
                rng.gen_range(-1.0f32..1.0),
                rng.gen_range(-1.0f32..1.0),
                rng.gen_range(-1.0f32..1.0),
            ];
            if p[0] * p[0] + p[1] * p[1] + p[2] * p[2] <= 1.0 {
                points.push(p);
            }
        }
        let features = derive_features(&pca_of(&points));

        assert!(features.scattering > 0.9);
        assert!(features.linearity < 0.1);
        assert!(features.planarity < 0.1);
    }

    #[test]
    fn test_dimensionality_descriptors_stay_in_unit_range() {
        let points: Vec<[f32; 3]> = vec![
            [0.0, 0.0, 0.0],
            [1.5, -0.5, 2.0],
            [-0.7, 1.2, 0.3],
            [2.0, 2.0, -1.0],
            [0.4, -1.8, 1.1],
            [-1.3, 0.9, -0.6],
        ];
        let features = derive_features(&pca_of(&points));

        for value in [features.linearity, features.planarity, features.scattering] {
            assert!((0.0..=1.0).contains(&value), "descriptor {value} out of range");
        }
    }

    #[test]
    fn test_fully_degenerate_neighborhood() {
        // Coincident points: zero spread everywhere, verticality defined
        // to be 0
        let features = derive_features(&pca_of(&[[4.0, 4.0, 4.0]; 5]));

        assert_eq!(features.verticality, 0.0);
        assert_eq!(features.length, 0.0);
        assert_eq!(features.linearity, 0.0);
        assert!(features.surface.is_finite());
        assert!(features.volume.is_finite());
        assert!(features.curvature.is_finite());
    }
}

//! Random direction sampling for seeding growth perturbations.

use nalgebra::Vector3;
use rand::Rng;

/// Sample `num` directions uniformly on the unit sphere, each scaled to
/// length `scale`.
///
/// Uses rejection sampling in the unit ball, so the distribution has no bias
/// towards the cube's corners.
///
/// # Example
///
/// ```
/// use diffmesh::random_unit_vectors;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let dirs = random_unit_vectors(16, 0.5, &mut rng);
/// assert!(dirs.iter().all(|d| (d.norm() - 0.5).abs() < 1e-12));
/// ```
pub fn random_unit_vectors<R: Rng + ?Sized>(num: usize, scale: f64, rng: &mut R) -> Vec<Vector3<f64>> {
    let mut out = Vec::with_capacity(num);
    while out.len() < num {
        let v = Vector3::<f64>::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let n2 = v.norm_squared();
        if n2 > 1e-12 && n2 <= 1.0 {
            out.push(v * (scale / n2.sqrt()));
        }
    }
    out
}

//! Sampling helpers over an explicit random source.
//!
//! Every function takes the source as `&mut dyn RngCore` so callers decide
//! seeding, and tests can substitute a deterministic mock.

use ember_math::Vec3;
use rand::{Rng, RngCore};

/// Rejection-sampling attempts before giving up on a source.
const MAX_REJECTION_ATTEMPTS: u32 = 64;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Random point strictly inside the unit sphere (3 draws per attempt).
///
/// A source that never lands inside the sphere gets its last candidate
/// clamped onto the boundary.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    let mut candidate = Vec3::ZERO;
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        candidate = 2.0 * Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng)) - Vec3::ONE;
        if candidate.length_squared() < 1.0 {
            return candidate;
        }
    }
    candidate.clamp_length_max(1.0)
}

/// Random point strictly inside the unit disk in the XY plane (2 draws per attempt).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    let mut candidate = Vec3::ZERO;
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        candidate = Vec3::new(gen_f32(rng) * 2.0 - 1.0, gen_f32(rng) * 2.0 - 1.0, 0.0);
        if candidate.length_squared() < 1.0 {
            return candidate;
        }
    }
    candidate.clamp_length_max(1.0)
}

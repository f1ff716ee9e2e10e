//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use ember_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Borrows the material from the shape that was hit, so it lives no longer
/// than the scene query that produced it.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Surface coordinates in [0, 1] x [0, 1]
    pub u: f32,
    pub v: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal as the shape defines it (not flipped toward the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns the nearest such hit, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

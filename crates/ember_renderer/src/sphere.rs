//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{quadratic, Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero, and a
    /// zero-radius sphere is never hit.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Cylindrical UV for a unit outward normal.
    ///
    /// u wraps around the Y axis, v runs from the bottom pole to the top.
    fn get_sphere_uv(n: Vec3) -> (f32, f32) {
        let u = n.x.atan2(n.z) / (2.0 * PI) + 0.5;
        let v = n.y * 0.5 + 0.5;
        (u, v)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        if self.radius <= 0.0 {
            return None;
        }

        // |O + tD - C|² = R²  =>  a t² + b t + c = 0
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let (t0, t1) = quadratic(a, b, c)?;

        // Nearest root in the acceptable range
        let t = if ray_t.surrounds(t0) {
            t0
        } else if ray_t.surrounds(t1) {
            t1
        } else {
            return None;
        };

        let p = ray.at(t);
        let normal = (p - self.center) / self.radius;
        let (u, v) = Self::get_sphere_uv(normal);

        Some(HitRecord {
            t,
            u,
            v,
            p,
            normal,
            material: &self.material,
        })
    }
}

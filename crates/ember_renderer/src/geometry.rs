//! The closed set of shapes a scene can hold.

use crate::{HitRecord, Hittable, Ray, Sphere, Triangle};
use ember_math::Interval;

/// A scene shape.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Hittable for Geometry {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Geometry::Sphere(sphere) => sphere.hit(ray, ray_t),
            Geometry::Triangle(triangle) => triangle.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Self {
        Geometry::Triangle(triangle)
    }
}

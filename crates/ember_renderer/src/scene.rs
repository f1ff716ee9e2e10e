//! Scene: a flat list of shapes, scanned linearly per ray.

use crate::{Geometry, HitRecord, Hittable, Ray};
use ember_math::Interval;

/// A collection of shapes. Insertion order does not affect results.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Geometry>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape to the scene.
    pub fn add(&mut self, object: impl Into<Geometry>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.objects.iter()
    }
}

impl Hittable for Scene {
    /// Closest hit across every object.
    ///
    /// The upper bound shrinks to the best `t` found so far, so later objects
    /// only register strictly nearer hits.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            let window = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(ray, window) {
                closest = Some(rec);
            }
        }

        closest
    }
}

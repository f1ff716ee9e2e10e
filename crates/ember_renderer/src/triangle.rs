//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Interval, Vec3};

/// Determinant threshold for culling and parallel rays.
const DET_EPSILON: f32 = 1e-8;

/// Valid range of each barycentric coordinate.
const BARYCENTRIC: Interval = Interval::new(0.0, 1.0);

/// How the reported normal is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalMode {
    /// The plane normal `cross(v1 - v0, v2 - v0)`.
    Flat,
    /// The plane normal offset by the barycentric weights `(u, v, 1 - u - v)`.
    ///
    /// This is a stylized pseudo-smooth shading trick, not vertex normal
    /// interpolation: the triangle stores no per-vertex normals and the
    /// result is not renormalized. It is not physically meaningful.
    #[default]
    BarycentricOffset,
}

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed plane normal (follows the winding, not unit length)
    normal: Vec3,
    material: Arc<Material>,
    cull_back_faces: bool,
    normal_mode: NormalMode,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Back faces are culled and normals use `NormalMode::BarycentricOffset`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0);

        Self {
            v0,
            v1,
            v2,
            normal,
            material,
            cull_back_faces: true,
            normal_mode: NormalMode::default(),
        }
    }

    /// Enable or disable back-face culling.
    pub fn with_back_face_culling(mut self, cull: bool) -> Self {
        self.cull_back_faces = cull;
        self
    }

    /// Choose how the hit normal is derived.
    pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
        self.normal_mode = mode;
        self
    }

    /// The plane normal, `cross(v1 - v0, v2 - v0)`.
    pub fn plane_normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let pvec = ray.direction().cross(edge2);
        let det = edge1.dot(pvec);

        // A positive determinant means the ray faces the front side
        if self.cull_back_faces {
            if det < DET_EPSILON {
                return None;
            }
        } else if det.abs() < DET_EPSILON {
            // Ray is parallel to triangle
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.v0;
        let u = tvec.dot(pvec) * inv_det;
        if !BARYCENTRIC.contains(u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = qvec.dot(ray.direction()) * inv_det;
        if !BARYCENTRIC.contains(v) || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;
        if !ray_t.surrounds(t) {
            return None;
        }

        let normal = match self.normal_mode {
            NormalMode::Flat => self.normal,
            NormalMode::BarycentricOffset => self.normal + Vec3::new(u, v, 1.0 - u - v),
        };

        Some(HitRecord {
            t,
            u,
            v,
            p: ray.at(t),
            normal,
            material: &self.material,
        })
    }
}

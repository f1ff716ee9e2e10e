//! Materials describe how light scatters off a surface.

use std::sync::Arc;

use crate::{gen_f32, hittable::HitRecord, random_in_unit_sphere, Ray, Texture};
use ember_math::Vec3;
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Below this discriminant refraction is treated as impossible.
const REFRACT_EPSILON: f32 = 1e-8;

/// An outgoing ray and the color energy it keeps.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Surface response to an incoming ray.
#[derive(Debug, Clone)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and the scattered ray, or None if the ray is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Arc<Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Arc::new(Texture::constant(albedo)),
        }
    }

    /// Lambertian whose albedo is looked up in a texture.
    pub fn textured(albedo: Arc<Texture>) -> Self {
        Self { albedo }
    }

    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Aim at a random point in the unit sphere sitting on the normal
        let target = rec.p + rec.normal + random_in_unit_sphere(rng);
        Some(ScatterResult {
            attenuation: self.albedo.texel_at(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, target - rec.p),
        })
    }
}

/// Metal (mirror) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
}

impl Metal {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize_or_zero(), rec.normal);

        // Only scatter if the reflected ray leaves the surface
        if reflected.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, reflected),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    refractive_index: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refractive_index: f32) -> Self {
        Self { refractive_index }
    }

    /// Probability of reflecting rather than refracting, and the refracted
    /// direction when refraction is possible.
    ///
    /// A positive `dot(direction, normal)` means the ray travels along the
    /// normal, from inside the medium towards the outside. Total internal
    /// reflection gives probability 1 and no refracted direction.
    pub fn reflect_probability(&self, direction: Vec3, normal: Vec3) -> (f32, Option<Vec3>) {
        let ri = self.refractive_index;
        let length = direction.length();
        if length == 0.0 {
            return (1.0, None);
        }

        let d_dot_n = direction.dot(normal);
        let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
            let cosine = d_dot_n / length;
            let cosine = (1.0 - ri * ri * (1.0 - cosine * cosine)).max(0.0).sqrt();
            (-normal, ri, cosine)
        } else {
            (normal, 1.0 / ri, -d_dot_n / length)
        };

        match refract(direction, outward_normal, ni_over_nt) {
            Some(refracted) => (schlick(cosine, ri), Some(refracted)),
            None => (1.0, None),
        }
    }

    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let direction = ray_in.direction();
        if direction.length_squared() == 0.0 {
            return None;
        }

        let (reflect_prob, refracted) = self.reflect_probability(direction, rec.normal);

        // One draw per hit decides the branch; exactly one ray leaves the surface
        let draw = gen_f32(rng);
        let outgoing = match refracted {
            Some(refracted) if draw >= reflect_prob => refracted,
            _ => reflect(direction, rec.normal),
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, outgoing),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal: `I - 2·dot(I, N)·N`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface with index ratio `ni_over_nt`.
///
/// Returns None when the discriminant is too small to refract (total
/// internal reflection, or a grazing ray).
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize_or_zero();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > REFRACT_EPSILON {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
pub fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

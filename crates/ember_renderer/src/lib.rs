//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a flat list of spheres and triangles.
//! Every camera ray is bounced through the scene according to each
//! surface's material until it escapes to the sky, is absorbed, or runs
//! out of bounces.

mod camera;
mod geometry;
mod hittable;
mod material;
mod random;
mod renderer;
mod scene;
mod sphere;
mod texture;
mod triangle;

pub use camera::Camera;
pub use geometry::Geometry;
pub use hittable::{HitRecord, Hittable};
pub use material::{
    reflect, refract, schlick, Color, Dielectric, Lambertian, Material, Metal, ScatterResult,
};
pub use random::{gen_f32, random_in_unit_disk, random_in_unit_sphere};
pub use renderer::{
    color_to_rgba, gamma_decode, gamma_encode, gradient_image, ray_color, render, render_pixel,
    sky_gradient, T_MIN,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use texture::{Texture, DEFAULT_TILE_DENSITY};
pub use triangle::{NormalMode, Triangle};

pub use ember_core::{PixelBuffer, RenderConfig};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Interval, Ray, Vec3};

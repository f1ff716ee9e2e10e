//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with a running attenuation product
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction to 8-bit RGBA

use std::time::Instant;

use crate::{gen_f32, Camera, Color, Hittable, Ray};
use ember_core::{PixelBuffer, RenderConfig};
use ember_math::Interval;
use rand::RngCore;

/// Lower bound of every scene query; keeps a bounce from re-hitting the
/// surface it just left.
pub const T_MIN: f32 = 1e-4;

const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Compute the color seen by a ray.
///
/// `depth` is the number of bounces already spent. Each scatter multiplies
/// the running attenuation; a miss returns that product times the sky, an
/// absorption or a hit past `max_bounces` returns black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut attenuation = Color::ONE;
    let mut ray = *ray;
    let mut depth = depth;
    let window = Interval {
        min: T_MIN,
        ..Interval::UNIVERSE
    };

    loop {
        let Some(rec) = world.hit(&ray, window) else {
            return attenuation * sky_gradient(&ray);
        };

        if depth >= config.max_bounces {
            return Color::ZERO;
        }

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                debug_assert!(
                    result.attenuation.is_finite(),
                    "non-finite attenuation {:?}",
                    result.attenuation
                );
                attenuation *= result.attenuation;
                ray = result.scattered;
                depth += 1;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }
}

/// Vertical white-to-blue gradient seen by rays that escape the scene.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * SKY_BLUE
}

/// Encode a linear channel value as an 8-bit gamma-corrected byte.
///
/// NaN encodes as 0; everything else is clamped to [0, 1] first.
#[inline]
pub fn gamma_encode(linear: f32, gamma: f32) -> u8 {
    if linear.is_nan() {
        return 0;
    }
    let corrected = Interval::new(0.0, 1.0).clamp(linear).powf(1.0 / gamma);
    (255.99 * corrected).floor() as u8
}

/// Inverse of `gamma_encode`, up to quantization.
#[inline]
pub fn gamma_decode(byte: u8, gamma: f32) -> f32 {
    (byte as f32 / 255.0).powf(gamma)
}

/// Convert a linear color to gamma-corrected 8-bit RGBA.
pub fn color_to_rgba(color: Color, gamma: f32) -> [u8; 4] {
    [
        gamma_encode(color.x, gamma),
        gamma_encode(color.y, gamma),
        gamma_encode(color.z, gamma),
        255,
    ]
}

/// Render a single pixel with multi-sampling.
///
/// `(i, j)` counts from the bottom-left corner.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.width as f32;
    let height = config.height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / width;
        let v = (j as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, 0, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Render the entire scene to an RGBA buffer.
///
/// Row 0 of the buffer is the top of the image (highest `j`).
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> PixelBuffer {
    log::info!(
        "Rendering {}x{} @ {} spp, {} max bounces",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_bounces
    );
    let start = Instant::now();
    let mut image = PixelBuffer::new(config.width, config.height);

    for j in (0..config.height).rev() {
        let row = config.height - 1 - j;
        for i in 0..config.width {
            let color = render_pixel(camera, world, i, j, config, rng);
            image.set(i, row, color_to_rgba(color, config.gamma));
        }
        if row % 25 == 0 {
            log::debug!("Finished row {}/{}", row + 1, config.height);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

/// Orientation debug image.
///
/// Red grows left to right and green grows bottom to top, laid out in the
/// same row order as `render`.
pub fn gradient_image(width: u32, height: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height);

    for j in (0..height).rev() {
        let row = height - 1 - j;
        for i in 0..width {
            let u = i as f32 / width as f32;
            let v = j as f32 / height as f32;
            let r = (255.99 * u).floor() as u8;
            let g = (255.99 * v).floor() as u8;
            image.set(i, row, [r, g, 0, 255]);
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Material, Metal, Scene, Sphere, Vec3};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn approx_eq(a: Color, b: Color) -> bool {
        (a - b).length() < 1e-4
    }

    fn config(width: u32, height: u32, samples: u32) -> RenderConfig {
        RenderConfig {
            width,
            height,
            samples_per_pixel: samples,
            ..Default::default()
        }
    }

    fn single_sphere(material: Material) -> Scene {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Arc::new(material)));
        scene
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0)));

        assert!(approx_eq(up, SKY_BLUE));
        assert!(approx_eq(down, Color::ONE));
        assert!(approx_eq(level, Color::new(0.75, 0.85, 1.0)));
    }

    #[test]
    fn test_miss_returns_background_at_any_depth() {
        let scene = single_sphere(Material::from(Lambertian::new(Color::ONE)));
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.8, 0.2));

        for depth in [0, 1, 49, 50, 1000] {
            assert_eq!(
                ray_color(&ray, &scene, depth, &config, &mut rng),
                sky_gradient(&ray)
            );
        }
    }

    #[test]
    fn test_bounce_budget_exhausted_is_black() {
        let scene = single_sphere(Material::from(Lambertian::new(Color::ONE)));
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(
            ray_color(&ray, &scene, config.max_bounces, &config, &mut rng),
            Color::ZERO
        );

        let no_bounces = RenderConfig {
            max_bounces: 0,
            ..Default::default()
        };
        assert_eq!(ray_color(&ray, &scene, 0, &no_bounces, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_absorption_is_black() {
        // From the centre, the mirror reflects straight back into itself
        let scene = single_sphere(Material::from(Metal::new(Color::ONE)));
        let config = RenderConfig::default();
        let mut rng = StepRng::new(0, 0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Z);

        assert_eq!(ray_color(&ray, &scene, 0, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_attenuation_multiplies() {
        let scene = single_sphere(Material::from(Metal::new(Color::new(0.5, 0.25, 1.0))));
        let config = RenderConfig::default();
        let mut rng = StepRng::new(0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Head-on mirror bounce, then out to the level horizon
        let color = ray_color(&ray, &scene, 0, &config, &mut rng);
        let horizon = Color::new(0.75, 0.85, 1.0);
        assert!(approx_eq(color, Color::new(0.5, 0.25, 1.0) * horizon));
    }

    #[test]
    fn test_gamma_round_trip() {
        for byte in 0..=255u8 {
            let encoded = gamma_encode(gamma_decode(byte, 2.2), 2.2);
            assert!(
                (encoded as i32 - byte as i32).abs() <= 1,
                "{byte} came back as {encoded}"
            );
        }
    }

    #[test]
    fn test_gamma_encode_guards() {
        assert_eq!(gamma_encode(f32::NAN, 2.2), 0);
        assert_eq!(gamma_encode(-1.0, 2.2), 0);
        assert_eq!(gamma_encode(f32::INFINITY, 2.2), 255);
        assert_eq!(gamma_encode(1.0, 2.2), 255);
        assert_eq!(gamma_encode(0.0, 2.2), 0);
        assert_eq!(color_to_rgba(Color::new(1.0, 0.0, 7.0), 2.2), [255, 0, 255, 255]);
    }

    #[test]
    fn test_gradient_image_orientation() {
        let image = gradient_image(200, 100);

        // Top-left: no red, nearly full green
        let top_left = image.get(0, 0);
        assert_eq!(top_left, [0, (255.99_f32 * 99.0 / 100.0) as u8, 0, 255]);

        // Bottom-left: no red, no green
        assert_eq!(image.get(0, 99), [0, 0, 0, 255]);

        // Bottom-right: red nearly full
        let bottom_right = image.get(199, 99);
        assert_eq!(bottom_right[0], (255.99_f32 * 199.0 / 200.0) as u8);
        assert_eq!(bottom_right[1], 0);

        // Red ascends left to right, green ascends bottom to top
        assert!(image.get(150, 50)[0] > image.get(50, 50)[0]);
        assert!(image.get(100, 10)[1] > image.get(100, 90)[1]);
    }

    #[test]
    fn test_single_sphere_end_to_end() {
        let scene = single_sphere(Material::from(Lambertian::new(Color::ONE)));
        let config = config(21, 11, 1);
        let camera = Camera::perspective(90.0, 2.0);
        let mut rng = StepRng::new(0, 0);

        let image = render(&camera, &scene, &config, &mut rng);
        assert_eq!(image.width(), 21);
        assert_eq!(image.height(), 11);

        let background = |i: u32, j: u32| {
            let mut rng = StepRng::new(0, 0);
            let ray = camera.get_ray(i as f32 / 21.0, j as f32 / 11.0, &mut rng);
            color_to_rgba(sky_gradient(&ray), config.gamma)
        };

        // Centre pixel (i=10, j=5) lands on row 11 - 1 - 5 = 5 and hits the sphere
        assert_ne!(image.get(10, 5), background(10, 5));

        // Top-left pixel (i=0, j=10) misses and shows exactly the sky
        assert_eq!(image.get(0, 0), background(0, 10));
        // So does the bottom-right one
        assert_eq!(image.get(20, 10), background(20, 0));
    }

    #[test]
    fn test_render_fills_every_pixel() {
        let scene = single_sphere(Material::from(Lambertian::new(Color::splat(0.5))));
        let config = config(8, 4, 4);
        let camera = Camera::perspective(90.0, config.aspect_ratio());
        let mut rng = StdRng::seed_from_u64(42);

        let image = render(&camera, &scene, &config, &mut rng);
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(image.get(x, y)[3], 255);
            }
        }
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = single_sphere(Material::from(Lambertian::new(Color::splat(0.5))));
        let config = config(10, 10, 8);
        let camera = Camera::perspective(90.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        // Half-albedo diffuse is darker than the brightest sky
        let color = render_pixel(&camera, &scene, 5, 5, &config, &mut rng);
        assert!(color.is_finite());
        assert!(color.x < 1.0 && color.length() > 0.0);
    }
}

//! Camera for ray generation.

use crate::{random_in_unit_disk, Ray};
use ember_math::Vec3;
use rand::RngCore;

/// World up vector used to build the oriented camera basis.
const WORLD_UP: Vec3 = Vec3::Y;

/// Maps normalized image-plane coordinates to world-space rays.
///
/// `u` runs left to right and `v` bottom to top, both in [0, 1].
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,

    // Camera basis
    forward: Vec3, // points away from the view direction
    right: Vec3,
    up: Vec3,

    lens_radius: f32,
}

impl Camera {
    /// Axis-aligned pinhole camera at the origin looking down -Z.
    ///
    /// The projection plane sits at unit distance.
    pub fn perspective(vfov: f32, aspect: f32) -> Self {
        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;

        Self {
            origin: Vec3::ZERO,
            lower_left: Vec3::new(-half_width, -half_height, -1.0),
            horizontal: Vec3::new(2.0 * half_width, 0.0, 0.0),
            vertical: Vec3::new(0.0, 2.0 * half_height, 0.0),
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            lens_radius: 0.0,
        }
    }

    /// Camera at `eye` looking at `target` with a thin lens.
    ///
    /// - `aperture`: lens diameter, 0 for a pinhole
    /// - `focus_dist`: distance to the plane of perfect focus
    pub fn look_at(
        vfov: f32,
        aspect: f32,
        eye: Vec3,
        target: Vec3,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;

        // Camera basis vectors
        let forward = (eye - target).try_normalize().unwrap_or(Vec3::Z);
        let right = WORLD_UP.cross(forward).try_normalize().unwrap_or_else(|| {
            log::warn!("Camera view direction is parallel to world up, using world X as right");
            Vec3::X
        });
        let up = forward.cross(right);

        // Projection plane at the focal distance
        let lower_left = eye
            - half_width * focus_dist * right
            - half_height * focus_dist * up
            - focus_dist * forward;

        Self {
            origin: eye,
            lower_left,
            horizontal: 2.0 * half_width * focus_dist * right,
            vertical: 2.0 * half_height * focus_dist * up,
            forward,
            right,
            up,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate the ray through image-plane coordinate (u, v).
    pub fn get_ray(&self, u: f32, v: f32, rng: &mut dyn RngCore) -> Ray {
        let origin = if self.lens_radius > 0.0 {
            let offset = self.lens_radius * random_in_unit_disk(rng);
            self.origin + offset.x * self.right + offset.y * self.up
        } else {
            self.origin
        };

        let target = self.lower_left + u * self.horizontal + v * self.vertical;
        Ray::new(origin, target - origin)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Unit vector pointing back toward the viewer.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_perspective_matches_classic_frame() {
        // fov 90, aspect 2 gives the classic (-2, -1, -1) frame
        let camera = Camera::perspective(90.0, 2.0);

        assert!(approx_eq(camera.lower_left, Vec3::new(-2.0, -1.0, -1.0)));
        assert!(approx_eq(camera.horizontal, Vec3::new(4.0, 0.0, 0.0)));
        assert!(approx_eq(camera.vertical, Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(camera.origin(), Vec3::ZERO);
        assert_eq!(camera.lens_radius(), 0.0);
    }

    #[test]
    fn test_perspective_center_ray() {
        let camera = Camera::perspective(90.0, 2.0);
        let mut rng = StepRng::new(0, 0);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!(approx_eq(ray.direction(), Vec3::new(0.0, 0.0, -1.0)));

        let corner = camera.get_ray(0.0, 0.0, &mut rng);
        assert!(approx_eq(corner.direction(), Vec3::new(-2.0, -1.0, -1.0)));
    }

    #[test]
    fn test_look_at_basis() {
        let camera = Camera::look_at(
            90.0,
            1.0,
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            0.0,
            5.0,
        );

        assert!(approx_eq(camera.forward(), Vec3::Z));
        assert!(approx_eq(camera.right, Vec3::X));
        assert!(approx_eq(camera.up, Vec3::Y));
    }

    #[test]
    fn test_look_at_center_ray_hits_focal_point() {
        let eye = Vec3::new(3.0, 2.0, 4.0);
        let target = Vec3::new(0.0, 0.0, -1.0);
        let focus_dist = (eye - target).length();
        let camera = Camera::look_at(40.0, 1.5, eye, target, 0.0, focus_dist);
        let mut rng = StepRng::new(0, 0);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert!(approx_eq(ray.at(1.0), target));
    }

    #[test]
    fn test_defocus_rays_converge_on_focal_plane() {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let target = Vec3::ZERO;
        let camera = Camera::look_at(30.0, 1.0, eye, target, 0.5, 3.0);
        let mut rng = StdRng::seed_from_u64(42);

        let mut saw_offset = false;
        for _ in 0..32 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            let offset = ray.origin() - eye;
            assert!(offset.length() <= camera.lens_radius() + 1e-5);
            // Offsets stay in the lens plane
            assert!(offset.dot(camera.forward()).abs() < 1e-5);
            saw_offset |= offset.length() > 1e-4;
            // Every lens sample still passes through the focus point
            assert!(approx_eq(ray.at(1.0), target));
        }
        assert!(saw_offset);
    }

    #[test]
    fn test_look_at_straight_down_stays_finite() {
        let camera = Camera::look_at(60.0, 1.0, Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 0.0, 5.0);
        let mut rng = StepRng::new(0, 0);

        let ray = camera.get_ray(0.25, 0.75, &mut rng);
        assert!(ray.direction().is_finite());
        assert!(ray.direction().y < 0.0);
    }
}

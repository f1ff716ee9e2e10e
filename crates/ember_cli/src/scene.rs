//! The demo scene and the camera views rendered from it.

use std::sync::Arc;

use ember_core::RenderConfig;
use ember_math::Vec3;
use ember_renderer::{
    Camera, Color, Dielectric, Lambertian, Material, Metal, Scene, Sphere, Texture, Triangle,
    DEFAULT_TILE_DENSITY,
};
use rand::{Rng, RngCore};

/// A camera paired with the label its image is written under.
pub struct View {
    pub label: &'static str,
    pub camera: Camera,
}

/// Spheres of metal, glass and diffuse material over a checkered ground,
/// with a mirror triangle behind them.
pub fn build_demo_scene(rng: &mut dyn RngCore) -> Scene {
    let mut scene = Scene::new();

    scene.add(Triangle::new(
        Vec3::new(-3.0, 0.0, -3.0),
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(-2.0, 2.0, -1.5),
        Arc::new(Material::from(Metal::new(Color::new(0.7, 0.1, 0.3)))),
    ));

    scene.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Material::from(Metal::new(Color::new(0.1, 0.2, 0.5)))),
    ));
    scene.add(Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.5,
        Arc::new(Material::from(Dielectric::new(1.5))),
    ));
    scene.add(Sphere::new(
        Vec3::new(1.0, 0.0, -2.0),
        0.5,
        Arc::new(Material::from(Lambertian::new(Color::new(
            rng.gen(),
            0.0,
            rng.gen(),
        )))),
    ));

    // Checkered ball
    let checker = checkerboard(
        Color::new(rng.gen(), 0.1, rng.gen()),
        Color::new(0.9, 0.9, rng.gen()),
    );
    scene.add(Sphere::new(
        Vec3::new(3.0, 2.0, -3.0),
        1.5,
        Arc::new(Material::from(Lambertian::textured(checker))),
    ));

    // Green and white ground
    let ground = checkerboard(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));
    scene.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Material::from(Lambertian::textured(ground))),
    ));

    log::info!("Built demo scene with {} objects", scene.len());
    scene
}

fn checkerboard(odd: Color, even: Color) -> Arc<Texture> {
    Arc::new(Texture::checkerboard(
        Arc::new(Texture::constant(odd)),
        Arc::new(Texture::constant(even)),
        DEFAULT_TILE_DENSITY,
    ))
}

/// The straight-ahead pinhole view and a defocused three-quarter view.
pub fn demo_views(config: &RenderConfig) -> Vec<View> {
    let aspect = config.aspect_ratio();

    let eye = Vec3::new(-2.0, 1.5, 1.0);
    let target = Vec3::new(0.0, 0.0, -1.0);
    let focus_dist = (eye - target).length();

    vec![
        View {
            label: "out_image",
            camera: Camera::perspective(90.0, aspect),
        },
        View {
            label: "out_image_dof",
            camera: Camera::look_at(50.0, aspect, eye, target, 0.2, focus_dist),
        },
    ]
}

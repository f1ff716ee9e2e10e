//! Render the demo scene to BMP files.
//!
//! Run with: cargo run --release --bin ember -- [render.json]

mod scene;

use anyhow::{Context, Result};
use ember_core::{BmpSink, ImageSink, RenderConfig};
use ember_renderer::{gradient_image, render};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::time::Instant;

fn load_config() -> Result<RenderConfig> {
    match env::args().nth(1) {
        Some(path) => RenderConfig::load(&path)
            .with_context(|| format!("Failed to load render config from {path}")),
        None => {
            log::info!("No config given, using defaults");
            Ok(RenderConfig::default())
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Ember");
    let config = load_config()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut sink = BmpSink::new(&config.output_dir);

    // Tells whether the image format puts row 0 at the top or the bottom
    if config.write_gradient {
        sink.write("out_image_grad", &gradient_image(config.width, config.height))
            .context("Failed to write gradient image")?;
    }

    let start = Instant::now();
    let world = scene::build_demo_scene(&mut rng);
    log::info!("Scene built in {:?}", start.elapsed());

    for view in scene::demo_views(&config) {
        let image = render(&view.camera, &world, &config, &mut rng);
        sink.write(view.label, &image)
            .with_context(|| format!("Failed to write {}", view.label))?;
    }

    log::info!("Done in {:?}", start.elapsed());
    Ok(())
}

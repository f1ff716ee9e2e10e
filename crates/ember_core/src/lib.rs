//! Ember Core - configuration and image plumbing for the Ember path tracer.
//!
//! This crate provides:
//!
//! - **Render configuration**: `RenderConfig`, loadable from JSON
//! - **Pixel storage**: `PixelBuffer`, a row-major RGBA8 image with row 0 at the top
//! - **Image sinks**: the `ImageSink` trait, with `BmpSink` for files and
//!   `MemorySink` for tests
//!
//! # Example
//!
//! ```ignore
//! use ember_core::{BmpSink, ImageSink, PixelBuffer, RenderConfig};
//!
//! let config = RenderConfig::load("render.json")?;
//! let mut sink = BmpSink::new(&config.output_dir);
//! sink.write("black", &PixelBuffer::new(config.width, config.height))?;
//! ```

pub mod config;
pub mod pixel;
pub mod sink;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, RenderConfig};
pub use pixel::PixelBuffer;
pub use sink::{BmpSink, ImageSink, MemorySink, SinkError, SinkResult};

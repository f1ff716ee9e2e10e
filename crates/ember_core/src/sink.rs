//! Image sinks: where finished pixel buffers go.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::PixelBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid image label: {0:?}")]
    InvalidLabel(String),
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Consumer of rendered images, addressed by a label.
pub trait ImageSink {
    fn write(&mut self, label: &str, image: &PixelBuffer) -> SinkResult<()>;
}

/// Writes each image as `<dir>/<label>.bmp`.
pub struct BmpSink {
    dir: PathBuf,
}

impl BmpSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path an image with this label is written to.
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{label}.bmp"))
    }
}

impl ImageSink for BmpSink {
    fn write(&mut self, label: &str, image: &PixelBuffer) -> SinkResult<()> {
        if label.is_empty() || label.contains(['/', '\\']) {
            return Err(SinkError::InvalidLabel(label.to_string()));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(label);

        image::save_buffer_with_format(
            &path,
            image.as_bytes(),
            image.width(),
            image.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Bmp,
        )?;

        log::info!(
            "Wrote {}x{} image to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }
}

/// Keeps every written image in memory.
#[derive(Default)]
pub struct MemorySink {
    pub images: Vec<(String, PixelBuffer)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an image by label.
    pub fn get(&self, label: &str) -> Option<&PixelBuffer> {
        self.images
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, image)| image)
    }
}

impl ImageSink for MemorySink {
    fn write(&mut self, label: &str, image: &PixelBuffer) -> SinkResult<()> {
        self.images.push((label.to_string(), image.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ember_sink_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_memory_sink_keeps_labels() {
        let mut sink = MemorySink::new();
        let mut image = PixelBuffer::new(2, 2);
        image.set(1, 0, [1, 2, 3, 255]);

        sink.write("first", &image).unwrap();
        sink.write("second", &PixelBuffer::new(1, 1)).unwrap();

        assert_eq!(sink.images.len(), 2);
        assert_eq!(sink.get("first").unwrap().get(1, 0), [1, 2, 3, 255]);
        assert!(sink.get("missing").is_none());
    }

    #[test]
    fn test_bmp_sink_writes_file() {
        let dir = scratch_dir("bmp");
        let mut sink = BmpSink::new(&dir);
        let mut image = PixelBuffer::new(4, 3);
        image.set(0, 0, [255, 0, 0, 255]);

        sink.write("test_image", &image).unwrap();

        let path = sink.path_for("test_image");
        assert!(path.exists());
        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 3);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bmp_sink_rejects_path_labels() {
        let mut sink = BmpSink::new(scratch_dir("label"));
        let err = sink.write("../escape", &PixelBuffer::new(1, 1)).unwrap_err();
        assert!(matches!(err, SinkError::InvalidLabel(_)));
    }
}

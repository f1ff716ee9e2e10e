//! Procedural textures.

use std::sync::Arc;

use crate::Color;
use ember_math::Vec3;

/// Checker tiles per unit of (u, v).
pub const DEFAULT_TILE_DENSITY: f32 = 25.0;

/// A procedural texture, evaluated at surface coordinates.
///
/// Sub-textures are shared, so one constant can back any number of
/// checkerboards.
#[derive(Debug, Clone)]
pub enum Texture {
    /// The same color everywhere.
    Constant(Color),
    /// Alternating tiles of two textures.
    Checkerboard {
        /// Used where `floor(u·d) + floor(v·d)` is odd
        odd: Arc<Texture>,
        /// Used where it is even
        even: Arc<Texture>,
        tile_density: f32,
    },
}

impl Texture {
    pub fn constant(color: Color) -> Self {
        Texture::Constant(color)
    }

    /// Checkerboard with `odd` on odd tiles and `even` on even tiles.
    pub fn checkerboard(odd: Arc<Texture>, even: Arc<Texture>, tile_density: f32) -> Self {
        Texture::Checkerboard {
            odd,
            even,
            tile_density,
        }
    }

    /// Color at surface coordinate (u, v) and world point `p`.
    pub fn texel_at(&self, u: f32, v: f32, p: Vec3) -> Color {
        match self {
            Texture::Constant(color) => *color,
            Texture::Checkerboard {
                odd,
                even,
                tile_density,
            } => {
                let a = (u * tile_density).floor();
                let b = (v * tile_density).floor();
                // Euclidean remainder keeps negative tiles alternating too
                if (a + b).rem_euclid(2.0) > 0.5 {
                    odd.texel_at(u, v, p)
                } else {
                    even.texel_at(u, v, p)
                }
            }
        }
    }
}

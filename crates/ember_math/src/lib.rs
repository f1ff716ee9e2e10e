// Re-export glam for convenience
pub use glam::*;

// Ember math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Solve `a·t² + b·t + c = 0` for real roots.
///
/// Uses the `q` formulation to avoid cancellation when `b² ≫ 4ac`.
/// Returns the roots ordered so that `t0 <= t1`.
pub fn quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root_discriminant = discriminant.sqrt();

    let q = if b < 0.0 {
        -0.5 * (b - root_discriminant)
    } else {
        -0.5 * (b + root_discriminant)
    };

    // b == 0 and discriminant == 0 forces c == 0: a double root at the origin
    if q == 0.0 {
        return Some((0.0, 0.0));
    }

    let t0 = q / a;
    let t1 = c / q;
    Some((t0.min(t1), t0.max(t1)))
}

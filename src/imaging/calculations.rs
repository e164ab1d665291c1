//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::Geometry;

/// Scale `edge` by `numerator / denominator`, rounded, never below one pixel.
fn scale_edge(edge: u32, numerator: u32, denominator: u32) -> u32 {
    ((edge as f64 * numerator as f64 / denominator as f64).round() as u32).max(1)
}

/// Calculate the output size of applying `geometry` to a `source` image.
///
/// | Geometry | Result |
/// |---|---|
/// | `w × 0` | width `w`, height from the aspect ratio |
/// | `0 × h` | height `h`, width from the aspect ratio |
/// | `w × h` | largest size that fits inside `w × h` |
/// | `w × h!` | exactly `w × h` |
/// | `0 × 0` | the source size |
///
/// With `ignore_aspect_ratio`, a zero edge keeps the source edge.
///
/// # Examples
/// ```
/// # use photo_organiser::imaging::{Geometry, calculate_resize_dimensions};
/// // 40x30 animation resized to 200 wide → 200x150
/// assert_eq!(calculate_resize_dimensions((40, 30), Geometry::width(200)), (200, 150));
///
/// // Aspect ratio ignored → exactly 100x100
/// assert_eq!(calculate_resize_dimensions((640, 480), Geometry::exact(100, 100)), (100, 100));
/// ```
pub fn calculate_resize_dimensions(source: (u32, u32), geometry: Geometry) -> (u32, u32) {
    let (src_w, src_h) = source;
    let Geometry {
        width,
        height,
        ignore_aspect_ratio,
    } = geometry;

    if src_w == 0 || src_h == 0 {
        return (width.max(1), height.max(1));
    }

    if ignore_aspect_ratio {
        let w = if width > 0 { width } else { src_w };
        let h = if height > 0 { height } else { src_h };
        return (w, h);
    }

    match (width, height) {
        (0, 0) => (src_w, src_h),
        (w, 0) => (w, scale_edge(src_h, w, src_w)),
        (0, h) => (scale_edge(src_w, h, src_h), h),
        (w, h) => {
            // Fit inside: the tighter ratio decides
            let ratio_w = w as f64 / src_w as f64;
            let ratio_h = h as f64 / src_h as f64;
            if ratio_w <= ratio_h {
                (w, scale_edge(src_h, w, src_w))
            } else {
                (scale_edge(src_w, h, src_h), h)
            }
        }
    }
}

/// Whether a frame of size `frame` placed at `(left, top)` covers the whole `canvas`.
pub fn covers_canvas(frame: (u32, u32), left: u32, top: u32, canvas: (u32, u32)) -> bool {
    left == 0 && top == 0 && frame == canvas
}

//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what files to produce) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 90). Clamped on construction.
//! - [`Geometry`] — Requested size: width, height (0 = derive from aspect), ignore-aspect flag.
//! - [`ResizeParams`] — Full specification for a still resize: source, output, geometry, quality.
//! - [`AnimationParams`] — Full specification for a coalesce + per-frame resize.

use std::fmt;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// A requested output size.
///
/// A zero `width` or `height` means "derive this edge from the source aspect
/// ratio". When both edges are set the image is fitted inside the box, unless
/// `ignore_aspect_ratio` is set, in which case it is stretched to exactly
/// `width × height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub ignore_aspect_ratio: bool,
}

impl Geometry {
    /// Fit inside `width × height`, keeping the aspect ratio.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ignore_aspect_ratio: false,
        }
    }

    /// Fixed width; height follows the aspect ratio.
    pub fn width(width: u32) -> Self {
        Self::new(width, 0)
    }

    /// Exactly `width × height`, aspect ratio ignored.
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ignore_aspect_ratio: true,
        }
    }
}

/// Geometry notation: `200x`, `x150`, `320x240`, `100x100!`.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width > 0 {
            write!(f, "{}", self.width)?;
        }
        write!(f, "x")?;
        if self.height > 0 {
            write!(f, "{}", self.height)?;
        }
        if self.ignore_aspect_ratio {
            write!(f, "!")?;
        }
        Ok(())
    }
}

/// Parameters for a single-image resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub geometry: Geometry,
    /// Only used when the output is JPEG.
    pub quality: Quality,
}

/// Parameters for an animation resize (coalesce, then resize every frame).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub geometry: Geometry,
}

//! Image processing on top of the `image` and `kamadak-exif` crates.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **EXIF profile / thumbnail** | `kamadak-exif` (IFD1 JPEG thumbnail) |
//! | **Animation resize** | `GifDecoder` frames → coalesce → Lanczos3 → `GifEncoder` |
//! | **Still resize** | `resize_exact` (Lanczos3) → PNG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **EXIF**: Profile reading and thumbnail location
//! - **Animation**: Frame coalescing and per-frame resize
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod animation;
pub mod backend;
mod calculations;
pub mod exif;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{AnimationSummary, BackendError, Dimensions, ExifThumbnail, ImageBackend};
pub use calculations::calculate_resize_dimensions;
pub use self::exif::{ExifEntry, ExifProfile, Ifd};
pub use operations::{
    ANIMATION_WIDTH, GeneratedOutput, STILL_SIZE, extract_thumbnail, read_exif, resize_animation,
    resize_still,
};
pub use params::{AnimationParams, Geometry, Quality, ResizeParams};
pub use rust_backend::RustBackend;

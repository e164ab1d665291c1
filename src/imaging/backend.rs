//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the operations every backend must
//! support: read_exif, exif_thumbnail, resize and resize_animation.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! and `kamadak-exif` crates. Operations in [`operations`](super::operations)
//! only ever talk to the trait, so tests can swap in a recording mock.

use super::exif::ExifProfile;
use super::params::{AnimationParams, ResizeParams};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Invalid EXIF thumbnail: {0}")]
    InvalidThumbnail(String),
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A JPEG thumbnail pulled out of an EXIF profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifThumbnail {
    /// Raw JPEG bytes, exactly as embedded.
    pub data: Vec<u8>,
    pub dimensions: Dimensions,
}

/// What an animation resize produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSummary {
    pub dimensions: Dimensions,
    pub frames: usize,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Read the EXIF profile, `None` if the image has none.
    fn read_exif(&self, path: &Path) -> Result<Option<ExifProfile>, BackendError>;

    /// Pull the embedded EXIF thumbnail, `None` if there is no profile or no thumbnail.
    fn exif_thumbnail(&self, path: &Path) -> Result<Option<ExifThumbnail>, BackendError>;

    /// Resize a single image and write it. Returns the written size.
    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError>;

    /// Coalesce an animation, resize every frame and write it.
    fn resize_animation(&self, params: &AnimationParams)
    -> Result<AnimationSummary, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Geometry;
    use crate::imaging::calculations::calculate_resize_dimensions;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// Resize results are computed from the queued source dimensions so
    /// operations see realistic sizes. Queues pop from the back.
    #[derive(Default)]
    pub struct MockBackend {
        pub source_dimensions: Mutex<Vec<Dimensions>>,
        pub thumbnail_results: Mutex<Vec<ExifThumbnail>>,
        pub frame_counts: Mutex<Vec<usize>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        ReadExif(String),
        ExifThumbnail(String),
        Resize {
            source: String,
            output: String,
            geometry: Geometry,
            quality: u32,
        },
        ResizeAnimation {
            source: String,
            output: String,
            geometry: Geometry,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                source_dimensions: Mutex::new(dims),
                ..Self::default()
            }
        }

        pub fn with_thumbnail(thumbnail: ExifThumbnail) -> Self {
            Self {
                thumbnail_results: Mutex::new(vec![thumbnail]),
                ..Self::default()
            }
        }

        pub fn with_animation(dims: Dimensions, frames: usize) -> Self {
            Self {
                source_dimensions: Mutex::new(vec![dims]),
                frame_counts: Mutex::new(vec![frames]),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn source_dims(&self) -> Result<Dimensions, BackendError> {
            self.source_dimensions
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn resized(&self, geometry: Geometry) -> Result<Dimensions, BackendError> {
            let src = self.source_dims()?;
            let (width, height) = calculate_resize_dimensions((src.width, src.height), geometry);
            Ok(Dimensions { width, height })
        }
    }

    impl ImageBackend for MockBackend {
        fn read_exif(&self, path: &Path) -> Result<Option<ExifProfile>, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::ReadExif(path.to_string_lossy().to_string()));
            Ok(None)
        }

        fn exif_thumbnail(&self, path: &Path) -> Result<Option<ExifThumbnail>, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::ExifThumbnail(path.to_string_lossy().to_string()));
            Ok(self.thumbnail_results.lock().unwrap().pop())
        }

        fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                geometry: params.geometry,
                quality: params.quality.value(),
            });
            self.resized(params.geometry)
        }

        fn resize_animation(
            &self,
            params: &AnimationParams,
        ) -> Result<AnimationSummary, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::ResizeAnimation {
                    source: params.source.to_string_lossy().to_string(),
                    output: params.output.to_string_lossy().to_string(),
                    geometry: params.geometry,
                });
            let dimensions = self.resized(params.geometry)?;
            let frames = self.frame_counts.lock().unwrap().pop().unwrap_or(1);
            Ok(AnimationSummary { dimensions, frames })
        }
    }

    #[test]
    fn mock_resize_applies_geometry() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 640,
            height: 480,
        }]);

        let dims = backend
            .resize(&ResizeParams {
                source: "/still.png".into(),
                output: "/still.100x100.png".into(),
                geometry: Geometry::exact(100, 100),
                quality: crate::imaging::Quality::default(),
            })
            .unwrap();

        assert_eq!(
            dims,
            Dimensions {
                width: 100,
                height: 100
            }
        );
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Resize { geometry, .. } if *geometry == Geometry::exact(100, 100)
        ));
    }

    #[test]
    fn mock_without_thumbnail_returns_none() {
        let backend = MockBackend::new();
        assert!(
            backend
                .exif_thumbnail(Path::new("/photo.jpg"))
                .unwrap()
                .is_none()
        );
    }
}

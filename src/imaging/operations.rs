//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They decide the output path and geometry, call the backend, and describe
//! what was written.
//!
//! The resize policy is fixed:
//!
//! | Operation | Geometry |
//! |---|---|
//! | Animation | width [`ANIMATION_WIDTH`], height from aspect ratio |
//! | Still | exactly [`STILL_SIZE`], aspect ratio ignored |

use super::backend::{BackendError, ImageBackend};
use super::exif::ExifProfile;
use super::params::{AnimationParams, Geometry, Quality, ResizeParams};
use crate::naming;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Target width for every frame of a resized animation.
pub const ANIMATION_WIDTH: u32 = 200;

/// Fixed output size for stills.
pub const STILL_SIZE: (u32, u32) = (100, 100);

/// A file written by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedOutput {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Frame count, for animations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<usize>,
}

/// Read the EXIF profile of `source`, `None` if it has none.
pub fn read_exif(backend: &impl ImageBackend, source: &Path) -> Result<Option<ExifProfile>> {
    backend.read_exif(source)
}

/// Extract the EXIF thumbnail of `source` into `<output_dir>/<stem>.thumb.jpg`.
///
/// The embedded bytes are written unchanged. Returns `None` when there is no
/// EXIF profile or the profile carries no thumbnail; nothing is written then.
pub fn extract_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
) -> Result<Option<GeneratedOutput>> {
    let Some(thumbnail) = backend.exif_thumbnail(source)? else {
        return Ok(None);
    };

    let path = output_dir.join(naming::thumbnail_name(source));
    std::fs::write(&path, &thumbnail.data)?;

    Ok(Some(GeneratedOutput {
        path,
        width: thumbnail.dimensions.width,
        height: thumbnail.dimensions.height,
        frames: None,
    }))
}

/// Plan an animation resize without executing it.
pub fn plan_animation_resize(source: &Path, output_dir: &Path) -> AnimationParams {
    AnimationParams {
        source: source.to_path_buf(),
        output: output_dir.join(naming::animation_name(source)),
        geometry: Geometry::width(ANIMATION_WIDTH),
    }
}

/// Coalesce the animation at `source` and resize every frame to
/// [`ANIMATION_WIDTH`] pixels wide.
pub fn resize_animation(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
) -> Result<GeneratedOutput> {
    let params = plan_animation_resize(source, output_dir);
    let summary = backend.resize_animation(&params)?;

    Ok(GeneratedOutput {
        path: params.output,
        width: summary.dimensions.width,
        height: summary.dimensions.height,
        frames: Some(summary.frames),
    })
}

/// Plan a still resize without executing it.
pub fn plan_still_resize(source: &Path, output_dir: &Path) -> ResizeParams {
    let (width, height) = STILL_SIZE;
    ResizeParams {
        source: source.to_path_buf(),
        output: output_dir.join(naming::still_name(source, width, height)),
        geometry: Geometry::exact(width, height),
        quality: Quality::default(),
    }
}

/// Resize the image at `source` to exactly [`STILL_SIZE`], ignoring aspect ratio.
pub fn resize_still(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
) -> Result<GeneratedOutput> {
    let params = plan_still_resize(source, output_dir);
    let dims = backend.resize(&params)?;

    Ok(GeneratedOutput {
        path: params.output,
        width: dims.width,
        height: dims.height,
        frames: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::backend::{Dimensions, ExifThumbnail};

    #[test]
    fn plan_animation_uses_fixed_width() {
        let params = plan_animation_resize(Path::new("/samples/snakeware.gif"), Path::new("/out"));

        assert_eq!(params.geometry, Geometry::width(200));
        assert_eq!(params.output, PathBuf::from("/out/snakeware.resized.gif"));
    }

    #[test]
    fn plan_still_ignores_aspect_ratio() {
        let params = plan_still_resize(Path::new("/samples/snakeware.png"), Path::new("/out"));

        assert_eq!(params.geometry, Geometry::exact(100, 100));
        assert!(params.geometry.ignore_aspect_ratio);
        assert_eq!(params.output, PathBuf::from("/out/snakeware.100x100.png"));
    }

    #[test]
    fn resize_animation_reports_frames_and_size() {
        let backend = MockBackend::with_animation(
            Dimensions {
                width: 40,
                height: 30,
            },
            12,
        );

        let out = resize_animation(&backend, Path::new("/anim.gif"), Path::new("/out")).unwrap();

        assert_eq!((out.width, out.height), (200, 150));
        assert_eq!(out.frames, Some(12));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::ResizeAnimation { source, output, .. }
                if source == "/anim.gif" && output == "/out/anim.resized.gif"
        ));
    }

    #[test]
    fn resize_still_is_exactly_100x100() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 640,
            height: 200,
        }]);

        let out = resize_still(&backend, Path::new("/still.png"), Path::new("/out")).unwrap();

        assert_eq!((out.width, out.height), (100, 100));
        assert_eq!(out.frames, None);
    }

    #[test]
    fn extract_thumbnail_writes_embedded_bytes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let data = vec![0xFF, 0xD8, 0x01, 0x02, 0xFF, 0xD9];
        let backend = MockBackend::with_thumbnail(ExifThumbnail {
            data: data.clone(),
            dimensions: Dimensions {
                width: 160,
                height: 120,
            },
        });

        let out = extract_thumbnail(&backend, Path::new("/photos/20150213_185641.jpg"), tmp.path())
            .unwrap()
            .expect("thumbnail written");

        assert_eq!(out.path, tmp.path().join("20150213_185641.thumb.jpg"));
        assert_eq!((out.width, out.height), (160, 120));
        assert_eq!(std::fs::read(&out.path).unwrap(), data);
    }

    #[test]
    fn extract_thumbnail_without_thumbnail_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::new();

        let out = extract_thumbnail(&backend, Path::new("/photo.jpg"), tmp.path()).unwrap();

        assert!(out.is_none());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn read_exif_delegates_to_backend() {
        let backend = MockBackend::new();
        assert!(read_exif(&backend, Path::new("/photo.jpg")).unwrap().is_none());
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::ReadExif(p) if p == "/photo.jpg"
        ));
    }
}

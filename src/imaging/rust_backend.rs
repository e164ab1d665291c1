//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF) | `image::ImageReader` with format sniffing |
//! | Decode animation | `image::codecs::gif::GifDecoder` + `AnimationDecoder::into_frames` |
//! | Coalesce | [`animation::coalesce`](super::animation::coalesce) |
//! | Resize | `DynamicImage::resize_exact` / `imageops::resize` with `Lanczos3` |
//! | Encode → PNG / GIF / JPEG | `image` codecs, chosen by output extension |
//! | EXIF profile + thumbnail | `kamadak-exif` via [`exif`](super::exif) |

use super::animation::{coalesce, resize_frames};
use super::backend::{AnimationSummary, BackendError, Dimensions, ExifThumbnail, ImageBackend};
use super::calculations::calculate_resize_dimensions;
use super::exif::{ExifProfile, read_exif_profile};
use super::params::{AnimationParams, ResizeParams};
use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// GIF encoder speed (1 = best palette, 30 = fastest).
const GIF_ENCODE_SPEED: i32 = 10;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, sniffing the format from its content.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Lowercased extension of `path`, empty if none.
fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    match extension(path).as_str() {
        "png" => img
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e))),
        "gif" => img
            .save_with_format(path, ImageFormat::Gif)
            .map_err(|e| BackendError::ProcessingFailed(format!("GIF encode failed: {}", e))),
        "jpg" | "jpeg" => save_jpeg(img, path, quality),
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            other
        ))),
    }
}

/// Encode and save as JPEG. Alpha is dropped; JPEG has no alpha channel.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = File::create(path).map_err(BackendError::Io)?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality as u8);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

/// Decode every frame of a GIF. Returns the logical screen size and the frames.
fn decode_gif_frames(path: &Path) -> Result<(Dimensions, Vec<image::Frame>), BackendError> {
    let file = File::open(path).map_err(BackendError::Io)?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to open GIF {}: {}", path.display(), e))
    })?;
    let (width, height) = decoder.dimensions();
    let frames = decoder.into_frames().collect_frames().map_err(|e| {
        BackendError::ProcessingFailed(format!(
            "Failed to decode frames of {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok((Dimensions { width, height }, frames))
}

/// Write frames as a looping GIF.
fn save_gif_frames(frames: Vec<image::Frame>, path: &Path) -> Result<(), BackendError> {
    let file = File::create(path).map_err(BackendError::Io)?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_ENCODE_SPEED);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| BackendError::ProcessingFailed(format!("GIF encode failed: {}", e)))?;
    encoder
        .encode_frames(frames)
        .map_err(|e| BackendError::ProcessingFailed(format!("GIF encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn read_exif(&self, path: &Path) -> Result<Option<ExifProfile>, BackendError> {
        read_exif_profile(path)
    }

    fn exif_thumbnail(&self, path: &Path) -> Result<Option<ExifThumbnail>, BackendError> {
        let Some(profile) = read_exif_profile(path)? else {
            debug!("{}: no EXIF profile", path.display());
            return Ok(None);
        };
        let Some(bytes) = profile.thumbnail_bytes()? else {
            debug!("{}: EXIF profile has no thumbnail", path.display());
            return Ok(None);
        };

        let thumb = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg).map_err(|e| {
            BackendError::InvalidThumbnail(format!(
                "embedded JPEG in {} does not decode: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(ExifThumbnail {
            data: bytes.to_vec(),
            dimensions: Dimensions {
                width: thumb.width(),
                height: thumb.height(),
            },
        }))
    }

    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let (width, height) =
            calculate_resize_dimensions((img.width(), img.height()), params.geometry);
        debug!(
            "resize {} {}x{} -> {}x{} ({})",
            params.source.display(),
            img.width(),
            img.height(),
            width,
            height,
            params.geometry
        );

        let resized = img.resize_exact(width, height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.quality.value())?;
        Ok(Dimensions { width, height })
    }

    fn resize_animation(
        &self,
        params: &AnimationParams,
    ) -> Result<AnimationSummary, BackendError> {
        let (canvas, frames) = decode_gif_frames(&params.source)?;
        let frame_count = frames.len();
        if frame_count == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "{} has no frames",
                params.source.display()
            )));
        }
        let (width, height) =
            calculate_resize_dimensions((canvas.width, canvas.height), params.geometry);
        debug!(
            "resize animation {} ({} frames) {}x{} -> {}x{}",
            params.source.display(),
            frame_count,
            canvas.width,
            canvas.height,
            width,
            height
        );

        let resized = resize_frames(coalesce(frames, canvas), width, height);
        save_gif_frames(resized, &params.output)?;

        Ok(AnimationSummary {
            dimensions: Dimensions { width, height },
            frames: frame_count,
        })
    }
}

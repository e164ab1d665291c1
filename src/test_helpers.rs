//! Shared test utilities for the photo-organiser test suite.
//!
//! Builds small synthetic fixtures on disk so tests never depend on checked-in
//! binaries:
//!
//! - [`create_png`] / [`create_jpeg`] — plain stills with a gradient
//! - [`create_exif_jpeg`] — a JPEG carrying an EXIF APP1 block whose IFD1
//!   points at an embedded thumbnail
//! - [`create_exif_jpeg_with_tiff`] — the same with a caller-built TIFF block,
//!   for broken thumbnail pointers
//! - [`create_animated_gif`] — a looping GIF with one distinct colour per frame
//! - [`create_delta_gif`] — a GIF whose frames are partial patches at an offset
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let photo = tmp.path().join("photo.jpg");
//! create_exif_jpeg(&photo, 64, 48, &jpeg_bytes(16, 12));
//! ```

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::jpeg::JpegEncoder;
use image::{Delay, ExtendedColorType, Frame, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Stills
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a gradient JPEG in memory.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut out = Vec::new();
    JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Write a gradient JPEG without any EXIF data.
pub fn create_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes(width, height)).unwrap();
}

/// Write a gradient PNG.
pub fn create_png(path: &Path, width: u32, height: u32) {
    gradient(width, height).save(path).unwrap();
}

// =========================================================================
// EXIF
// =========================================================================

/// Little-endian TIFF block: IFD0 with Orientation, IFD1 pointing at `thumbnail`.
pub fn tiff_with_thumbnail(thumbnail: &[u8]) -> Vec<u8> {
    tiff_with_thumbnail_length(thumbnail, thumbnail.len() as u32)
}

/// Like [`tiff_with_thumbnail`], but IFD1 declares `declared_length` bytes.
///
/// ```text
/// 0   header "II*\0", IFD0 offset 8
/// 8   IFD0: 1 entry (Orientation = 1), next IFD = 26
/// 26  IFD1: 2 entries (JPEGInterchangeFormat = 56, JPEGInterchangeFormatLength), next = 0
/// 56  thumbnail bytes
/// ```
pub fn tiff_with_thumbnail_length(thumbnail: &[u8], declared_length: u32) -> Vec<u8> {
    const IFD1_OFFSET: u32 = 26;
    const THUMB_OFFSET: u32 = 56;

    fn entry(out: &mut Vec<u8>, tag: u16, kind: u16, value: u32) {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&value.to_le_bytes());
    }

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    // IFD0: Orientation (SHORT, value packed into the low bytes)
    tiff.extend_from_slice(&1u16.to_le_bytes());
    entry(&mut tiff, 0x0112, 3, 1);
    tiff.extend_from_slice(&IFD1_OFFSET.to_le_bytes());

    // IFD1: thumbnail offset + length (LONG)
    tiff.extend_from_slice(&2u16.to_le_bytes());
    entry(&mut tiff, 0x0201, 4, THUMB_OFFSET);
    entry(&mut tiff, 0x0202, 4, declared_length);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    assert_eq!(tiff.len(), THUMB_OFFSET as usize);
    tiff.extend_from_slice(thumbnail);
    tiff
}

/// Write a JPEG whose APP1 segment carries an EXIF block embedding `thumbnail`.
pub fn create_exif_jpeg(path: &Path, width: u32, height: u32, thumbnail: &[u8]) {
    create_exif_jpeg_with_tiff(path, width, height, &tiff_with_thumbnail(thumbnail));
}

/// Write a JPEG whose APP1 segment carries `tiff` verbatim.
pub fn create_exif_jpeg_with_tiff(path: &Path, width: u32, height: u32, tiff: &[u8]) {
    let main = jpeg_bytes(width, height);

    let mut app1 = Vec::new();
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(tiff);
    let segment_len = u16::try_from(app1.len() + 2).expect("APP1 segment too large");

    let mut out = Vec::new();
    out.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&app1);
    // Rest of the encoded JPEG, after its own SOI
    out.extend_from_slice(&main[2..]);
    std::fs::write(path, out).unwrap();
}

// =========================================================================
// Animation
// =========================================================================

const FRAME_COLORS: &[[u8; 3]] = &[
    [220, 20, 20],
    [20, 220, 20],
    [20, 20, 220],
    [220, 220, 20],
];

/// Write a looping GIF of `frames` full-canvas frames, 100ms each.
pub fn create_animated_gif(path: &Path, width: u32, height: u32, frames: usize) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GifEncoder::new(std::io::BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite).unwrap();

    let frames = (0..frames).map(|i| {
        let [r, g, b] = FRAME_COLORS[i % FRAME_COLORS.len()];
        let buffer = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
        Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(100, 1))
    });
    encoder.encode_frames(frames).unwrap();
}

/// One frame of a [`create_delta_gif`] animation.
pub struct DeltaFrame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub color: [u8; 3],
    /// Centiseconds, as stored in the GIF.
    pub delay: u16,
}

/// Write a looping GIF on a `width`x`height` screen whose frames are solid
/// patches placed at their offsets with `Keep` disposal, so every frame after
/// the first only updates part of the screen.
pub fn create_delta_gif(path: &Path, width: u16, height: u16, frames: &[DeltaFrame]) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = gif::Encoder::new(std::io::BufWriter::new(file), width, height, &[]).unwrap();
    encoder.set_repeat(gif::Repeat::Infinite).unwrap();

    for patch in frames {
        let [r, g, b] = patch.color;
        let mut pixels: Vec<u8> = (0..usize::from(patch.width) * usize::from(patch.height))
            .flat_map(|_| [r, g, b, 255])
            .collect();
        let mut frame = gif::Frame::from_rgba_speed(patch.width, patch.height, &mut pixels, 10);
        frame.left = patch.left;
        frame.top = patch.top;
        frame.delay = patch.delay;
        frame.dispose = gif::DisposalMethod::Keep;
        encoder.write_frame(&frame).unwrap();
    }
}

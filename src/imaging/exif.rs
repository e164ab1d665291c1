//! EXIF profile reading and embedded thumbnail location.
//!
//! Parsing is delegated to `kamadak-exif`, which finds the EXIF block in
//! JPEG (APP1), TIFF, PNG (`eXIf`), WebP and HEIF containers. This module
//! flattens the parsed fields into displayable [`ExifEntry`] rows and locates
//! the JPEG thumbnail stored in IFD1:
//!
//! - `JPEGInterchangeFormat` (0x0201) — thumbnail offset
//! - `JPEGInterchangeFormatLength` (0x0202) — thumbnail length
//!
//! Offsets are relative to the start of the TIFF header, which is the start
//! of the buffer `kamadak-exif` keeps. Uncompressed (strip-based) TIFF
//! thumbnails are not extracted.

use super::backend::BackendError;
use exif::{Exif, In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::ops::Range;
use std::path::Path;

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// `kamadak-exif`'s error for containers it cannot carry EXIF in (GIF, BMP).
const UNKNOWN_CONTAINER: &str = "Unknown image format";

/// Which image file directory a field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ifd {
    /// IFD0, the main image.
    Primary,
    /// IFD1, the thumbnail.
    Thumbnail,
    /// Further IFDs (multi-page TIFF).
    Other(u16),
}

impl Ifd {
    fn from_in(ifd: In) -> Self {
        match ifd.index() {
            0 => Ifd::Primary,
            1 => Ifd::Thumbnail,
            n => Ifd::Other(n),
        }
    }
}

/// A single EXIF field rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifEntry {
    pub ifd: Ifd,
    pub tag: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ThumbnailLocation {
    Absent,
    Found(Range<usize>),
    Invalid(String),
}

/// An image's EXIF block: displayable entries plus the raw TIFF buffer.
#[derive(Debug, Clone)]
pub struct ExifProfile {
    entries: Vec<ExifEntry>,
    buf: Vec<u8>,
    thumbnail: ThumbnailLocation,
}

impl ExifProfile {
    fn from_exif(exif: &Exif) -> Self {
        let entries = exif
            .fields()
            .map(|field| ExifEntry {
                ifd: Ifd::from_in(field.ifd_num),
                tag: field.tag.to_string(),
                value: field.display_value().with_unit(exif).to_string(),
            })
            .collect();

        let offset = exif
            .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)
            .and_then(|f| f.value.get_uint(0));
        let length = exif
            .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)
            .and_then(|f| f.value.get_uint(0));

        let thumbnail = match locate_thumbnail(exif.buf(), offset, length) {
            Ok(Some(range)) => ThumbnailLocation::Found(range),
            Ok(None) => ThumbnailLocation::Absent,
            Err(reason) => ThumbnailLocation::Invalid(reason),
        };

        Self {
            entries,
            buf: exif.buf().to_vec(),
            thumbnail,
        }
    }

    pub fn entries(&self) -> &[ExifEntry] {
        &self.entries
    }

    /// Whether IFD1 points at a usable JPEG thumbnail.
    pub fn has_thumbnail(&self) -> bool {
        matches!(self.thumbnail, ThumbnailLocation::Found(_))
    }

    /// The embedded JPEG thumbnail bytes.
    ///
    /// `Ok(None)` when the profile carries no thumbnail; an error when IFD1
    /// points outside the EXIF data or at something that is not a JPEG.
    pub fn thumbnail_bytes(&self) -> Result<Option<&[u8]>, BackendError> {
        match &self.thumbnail {
            ThumbnailLocation::Absent => Ok(None),
            ThumbnailLocation::Found(range) => Ok(Some(&self.buf[range.clone()])),
            ThumbnailLocation::Invalid(reason) => {
                Err(BackendError::InvalidThumbnail(reason.clone()))
            }
        }
    }
}

/// Read the EXIF profile of an image file.
///
/// Returns `Ok(None)` when the container holds no EXIF block, or is a format
/// that cannot hold one.
pub fn read_exif_profile(path: &Path) -> Result<Option<ExifProfile>, BackendError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(Some(ExifProfile::from_exif(&exif))),
        Err(exif::Error::NotFound(_)) => Ok(None),
        Err(exif::Error::InvalidFormat(UNKNOWN_CONTAINER)) => Ok(None),
        Err(exif::Error::Io(e)) => Err(BackendError::Io(e)),
        Err(e) => Err(BackendError::ProcessingFailed(format!(
            "Failed to read EXIF from {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Resolve the IFD1 offset/length pair into a byte range of `buf`.
fn locate_thumbnail(
    buf: &[u8],
    offset: Option<u32>,
    length: Option<u32>,
) -> Result<Option<Range<usize>>, String> {
    let (Some(offset), Some(length)) = (offset, length) else {
        return Ok(None);
    };
    if length == 0 {
        return Ok(None);
    }

    let start = offset as usize;
    let end = start
        .checked_add(length as usize)
        .ok_or_else(|| format!("thumbnail range overflows ({offset} + {length})"))?;
    if end > buf.len() {
        return Err(format!(
            "thumbnail range {start}..{end} exceeds EXIF data ({} bytes)",
            buf.len()
        ));
    }
    if !buf[start..end].starts_with(&JPEG_SOI) {
        return Err("thumbnail does not start with a JPEG SOI marker".to_string());
    }
    Ok(Some(start..end))
}

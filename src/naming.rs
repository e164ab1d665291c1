//! Output filename derivation.
//!
//! Every output is named after the source file stem plus a suffix that says
//! what was done to it:
//!
//! - `20150213_185641.jpg` → `20150213_185641.thumb.jpg` (EXIF thumbnail)
//! - `snakeware.gif` → `snakeware.resized.gif` (coalesced + resized animation)
//! - `snakeware.png` → `snakeware.100x100.png` (fixed-size still)

use std::path::Path;

/// Stem used when a path has no usable file name (e.g. `/` or `..`).
const FALLBACK_STEM: &str = "image";

/// File name without its last extension.
///
/// - `"photos/20150213_185641.jpg"` → `"20150213_185641"`
/// - `"archive.tar.gz"` → `"archive.tar"`
/// - `".hidden"` → `".hidden"`
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string())
}

/// `<stem>.thumb.jpg` — EXIF thumbnails are always JPEG.
pub fn thumbnail_name(source: &Path) -> String {
    format!("{}.thumb.jpg", file_stem(source))
}

/// `<stem>.resized.gif`
pub fn animation_name(source: &Path) -> String {
    format!("{}.resized.gif", file_stem(source))
}

/// `<stem>.<width>x<height>.png`
pub fn still_name(source: &Path, width: u32, height: u32) -> String {
    format!("{}.{}x{}.png", file_stem(source), width, height)
}

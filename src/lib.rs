//! # Photo Organiser
//!
//! A small worker around the `image` and `kamadak-exif` crates for a photo
//! organiser. It performs three independent operations:
//!
//! ```text
//! thumbnail   JPEG  →  EXIF profile  →  embedded thumbnail  →  <stem>.thumb.jpg
//! resize-gif  GIF   →  coalesce      →  resize to 200px wide →  <stem>.resized.gif
//! resize-png  PNG   →  resize to exactly 100x100             →  <stem>.100x100.png
//! ```
//!
//! No data flows between them. Decoding, resampling, EXIF parsing and
//! encoding belong to the libraries; this crate owns the dimension math,
//! frame coalescing, output naming, configuration and reporting.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Backend trait, `image`-crate backend, EXIF, coalescing, operations |
//! | [`worker`] | Runs the configured operations, emits progress events, builds the run report |
//! | [`config`] | `photo-organiser.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | Output filename derivation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing-subscriber` setup |
//!
//! # Design Decisions
//!
//! ## Fixed Resize Policy
//!
//! Animations are always resized to 200px wide with the height following the
//! aspect ratio; stills are always stretched to exactly 100x100. The constants
//! live in [`imaging::operations`]; only the file locations are configurable.
//!
//! ## Coalesce Before Resize
//!
//! Animated GIFs store frames as deltas over earlier frames. Resizing a delta
//! frame on its own produces seams, so every frame is first rendered to the
//! full logical screen ([`imaging::animation::coalesce`]) and only then
//! resized.
//!
//! ## Thumbnail Bytes Are Not Re-encoded
//!
//! The EXIF thumbnail is already a JPEG. It is written out byte-for-byte;
//! decoding it only serves to report its dimensions and to reject broken
//! thumbnails.
//!
//! ## Independent Jobs
//!
//! [`worker::Worker::run`] keeps going when a job fails. Each job's outcome
//! is recorded in the report and the process exits non-zero if any failed.

pub mod config;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod output;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_helpers;

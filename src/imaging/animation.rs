//! Animation frame coalescing and per-frame resizing.
//!
//! GIF and APNG store frames as deltas: a frame may cover only part of the
//! logical screen, placed at an offset, relying on the previous frame for the
//! rest. Coalescing turns every frame into the full picture as it looks at
//! that point of the animation, so each one can be resized independently.
//!
//! - A frame covering the whole canvas at the origin is taken as already
//!   rendered (the `image` GIF decoder composites frames this way).
//! - Any other frame is drawn over the previous rendered frame.

use super::backend::Dimensions;
use super::calculations::covers_canvas;
use image::imageops::{self, FilterType};
use image::{Frame, RgbaImage};

/// Coalesce `frames` onto a `canvas`-sized logical screen.
///
/// Every returned frame has the canvas size, sits at `(0, 0)` and keeps its
/// original delay.
pub fn coalesce(frames: Vec<Frame>, canvas: Dimensions) -> Vec<Frame> {
    let mut rendered = RgbaImage::new(canvas.width, canvas.height);
    let mut out = Vec::with_capacity(frames.len());

    for frame in frames {
        let delay = frame.delay();
        let (left, top) = (frame.left(), frame.top());
        let buffer = frame.into_buffer();

        if covers_canvas(
            buffer.dimensions(),
            left,
            top,
            (canvas.width, canvas.height),
        ) {
            rendered = buffer;
        } else {
            imageops::overlay(&mut rendered, &buffer, i64::from(left), i64::from(top));
        }

        out.push(Frame::from_parts(rendered.clone(), 0, 0, delay));
    }

    out
}

/// Resize every (coalesced) frame to `width × height` with Lanczos3.
pub fn resize_frames(frames: Vec<Frame>, width: u32, height: u32) -> Vec<Frame> {
    frames
        .into_iter()
        .map(|frame| {
            let delay = frame.delay();
            let resized = imageops::resize(frame.buffer(), width, height, FilterType::Lanczos3);
            Frame::from_parts(resized, 0, 0, delay)
        })
        .collect()
}

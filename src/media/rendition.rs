// SPDX-License-Identifier: MPL-2.0
//! Decoding of downloaded renditions into displayable frames.
//!
//! GIFs are decoded frame by frame so the featured image can animate. Very
//! large animations fall back to their first frame to keep memory bounded.

use crate::error::{Error, Result};
use iced::widget::image::Handle;
use image_rs::codecs::gif::GifDecoder;
use image_rs::{AnimationDecoder, ImageDecoder, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// Maximum number of decoded frames per GIF.
pub const MAX_GIF_FRAMES: usize = 300;
/// Maximum decoded RGBA bytes budget per GIF.
pub const MAX_DECODED_BYTES: u64 = 128 * 1024 * 1024;
/// Maximum allowed frame dimension in pixels.
pub const MAX_FRAME_DIMENSION: u32 = 4096;

/// Delays at or below this are treated as unset.
const MIN_FRAME_DELAY: Duration = Duration::from_millis(10);
/// Delay used for unset frame delays, matching what browsers do.
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// A single decoded frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub handle: Handle,
    pub delay: Duration,
}

/// A decoded rendition: one frame for stills, several for animations.
#[derive(Debug, Clone)]
pub struct Rendition {
    frames: Arc<[Frame]>,
    width: u32,
    height: u32,
    cycle: Duration,
}

impl Rendition {
    fn new(frames: Vec<Frame>, width: u32, height: u32) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::Decode("image has no frames".into()));
        }
        let cycle = frames.iter().map(|frame| frame.delay).sum();
        Ok(Self {
            frames: frames.into(),
            width,
            height,
            cycle,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// First frame, used for stills and thumbnails.
    #[must_use]
    pub fn first_frame(&self) -> &Handle {
        &self.frames[0].handle
    }

    /// Frame to show `elapsed` after the animation started, looping forever.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> &Handle {
        if !self.is_animated() || self.cycle.is_zero() {
            return self.first_frame();
        }

        let cycle_ms = self.cycle.as_millis();
        let mut remaining = elapsed.as_millis() % cycle_ms;
        for frame in self.frames.iter() {
            let delay = frame.delay.as_millis();
            if remaining < delay {
                return &frame.handle;
            }
            remaining -= delay;
        }
        self.first_frame()
    }
}

/// Decodes downloaded bytes. GIFs keep all their frames; other formats
/// produce a single frame.
pub fn decode_rendition(bytes: &[u8]) -> Result<Rendition> {
    if looks_like_gif(bytes) {
        decode_gif(bytes)
    } else {
        let image = image_rs::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        Rendition::new(vec![still_frame(image)], width, height)
    }
}

fn looks_like_gif(bytes: &[u8]) -> bool {
    bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")
}

fn decode_gif(bytes: &[u8]) -> Result<Rendition> {
    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    let (width, height) = decoder.dimensions();
    if width > MAX_FRAME_DIMENSION || height > MAX_FRAME_DIMENSION {
        return Err(Error::Decode(format!(
            "GIF dimensions {width}x{height} exceed {MAX_FRAME_DIMENSION}px"
        )));
    }

    let frame_bytes = u64::from(width) * u64::from(height) * 4;
    let mut frames = Vec::new();
    let mut decoded_bytes = 0u64;

    for frame in decoder.into_frames() {
        let frame = match frame {
            Ok(frame) => frame,
            // Keep what decoded so far; a truncated GIF still shows something.
            Err(err) if !frames.is_empty() => {
                log::debug!("GIF truncated after {} frames: {}", frames.len(), err);
                break;
            }
            Err(err) => return Err(err.into()),
        };

        decoded_bytes = decoded_bytes.saturating_add(frame_bytes);
        if frames.len() >= MAX_GIF_FRAMES || decoded_bytes > MAX_DECODED_BYTES {
            log::debug!("GIF too large to animate, showing first frame only");
            frames.truncate(1);
            break;
        }

        let delay = normalize_delay(Duration::from(frame.delay()));
        let buffer = frame.into_buffer();
        frames.push(Frame {
            handle: rgba_handle(buffer),
            delay,
        });
    }

    Rendition::new(frames, width, height)
}

fn normalize_delay(delay: Duration) -> Duration {
    if delay <= MIN_FRAME_DELAY {
        DEFAULT_FRAME_DELAY
    } else {
        delay
    }
}

fn still_frame(image: RgbaImage) -> Frame {
    Frame {
        handle: rgba_handle(image),
        delay: Duration::ZERO,
    }
}

fn rgba_handle(image: RgbaImage) -> Handle {
    let (width, height) = image.dimensions();
    Handle::from_rgba(width, height, image.into_raw())
}

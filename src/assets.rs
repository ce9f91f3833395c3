pub mod decode;

use crate::foundation::error::{CardError, CardResult};

/// Decoded 8-bit image, straight alpha when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    pub width: u32,
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA).
    pub channels: u8,
    /// Row-major, tightly packed.
    pub data: Vec<u8>,
}

impl PixelImage {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> CardResult<Self> {
        if channels != 3 && channels != 4 {
            return Err(CardError::validation(format!(
                "pixel images must have 3 or 4 channels, got {channels}"
            )));
        }
        let expected = (width as usize) * (height as usize) * usize::from(channels);
        if data.len() != expected {
            return Err(CardError::validation(format!(
                "pixel buffer has {} bytes, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Channels of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let ch = usize::from(self.channels);
        let off = ((y as usize) * (self.width as usize) + (x as usize)) * ch;
        &self.data[off..off + ch]
    }
}

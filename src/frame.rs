//! RGB24 frame container.
//!
//! A `Frame` is an ephemeral buffer: captured once per tick, run through the
//! detection pipeline, then dropped. Nothing downstream retains frames.

use anyhow::{anyhow, Result};

/// One captured frame, tightly packed RGB24.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Build a frame from an RGB24 buffer, validating the length against the
    /// dimensions.
    pub fn from_rgb(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(anyhow!("frame dimensions must be non-zero"));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| anyhow!("frame dimensions overflow"))? as usize;
        if data.len() != expected {
            return Err(anyhow!(
                "RGB frame length mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// RGB triple at (x, y). Callers must stay in bounds.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = ((y * self.width + x) * 3) as usize;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ]
    }

    /// Mirror the frame horizontally in place (selfie view).
    pub fn mirror(&mut self) {
        let w = self.width as usize;
        for row in self.data.chunks_exact_mut(w * 3) {
            let (mut left, mut right) = (0usize, w - 1);
            while left < right {
                for c in 0..3 {
                    row.swap(left * 3 + c, right * 3 + c);
                }
                left += 1;
                right -= 1;
            }
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

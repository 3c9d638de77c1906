//! The HSV ball backend: the real detection pipeline.
//!
//! Per frame: Gaussian blur, one RGB→HSV conversion, then per color class
//! an in-range mask, morphological cleanup, largest-blob selection, and a
//! minimum enclosing circle. A fitted radius at or below the noise floor
//! discards the detection.

use anyhow::{anyhow, Result};

use crate::detect::backend::DetectorBackend;
use crate::detect::blur::gaussian_blur;
use crate::detect::circle::min_enclosing_circle;
use crate::detect::contour::{find_blobs, largest_blob};
use crate::detect::hsv::{mask_in_range, rgb_to_hsv_buffer};
use crate::detect::result::{BallSighting, FrameDetections};
use crate::ColorClass;

/// Default radius noise floor in pixels; fits at or below are discarded.
pub const DEFAULT_MIN_RADIUS: f32 = 10.0;

pub struct HsvBallBackend {
    min_radius: f32,
}

impl HsvBallBackend {
    pub fn new(min_radius: f32) -> Self {
        Self { min_radius }
    }

    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }
}

impl Default for HsvBallBackend {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RADIUS)
    }
}

impl DetectorBackend for HsvBallBackend {
    fn name(&self) -> &'static str {
        "hsv"
    }

    fn detect(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<FrameDetections> {
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| anyhow!("frame dimensions overflow"))? as usize;
        if pixels.len() != expected {
            return Err(anyhow!(
                "RGB frame length mismatch: expected {}, got {}",
                expected,
                pixels.len()
            ));
        }

        let blurred = gaussian_blur(pixels, width, height);
        let hsv = rgb_to_hsv_buffer(&blurred);

        let mut detections = FrameDetections::default();
        for class in ColorClass::ALL {
            let mask = mask_in_range(&hsv, width, height, class.hsv_range()).cleaned();
            let blobs = find_blobs(&mask);
            let sighting = largest_blob(&blobs)
                .and_then(|blob| min_enclosing_circle(&blob.boundary))
                .filter(|circle| circle.radius > self.min_radius)
                .map(|circle| BallSighting {
                    center: circle.center_pixel(),
                    radius: circle.radius,
                });
            detections.set(class, sighting);
        }
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelPoint;

    const GRAY: [u8; 3] = [60, 60, 60];

    fn frame_with_disc(
        width: u32,
        height: u32,
        center: PixelPoint,
        radius: i64,
        color: [u8; 3],
    ) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&GRAY);
        }
        for y in 0..height as i64 {
            for x in 0..width as i64 {
                let dx = x - center.x as i64;
                let dy = y - center.y as i64;
                if dx * dx + dy * dy <= radius * radius {
                    let offset = ((y * width as i64 + x) * 3) as usize;
                    pixels[offset..offset + 3].copy_from_slice(&color);
                }
            }
        }
        pixels
    }

    #[test]
    fn detects_a_blue_disc_near_its_true_center() -> Result<()> {
        let mut backend = HsvBallBackend::default();
        let center = PixelPoint::new(80, 60);
        let radius = 20i64;
        let pixels = frame_with_disc(160, 120, center, radius, [30, 60, 220]);

        let detections = backend.detect(&pixels, 160, 120)?;
        let sighting = detections
            .get(ColorClass::Blue)
            .expect("disc should be detected");

        let dx = sighting.center.x as i64 - center.x as i64;
        let dy = sighting.center.y as i64 - center.y as i64;
        // Center inside the disc, radius close to the drawn radius.
        assert!(dx * dx + dy * dy <= radius * radius);
        assert!((sighting.radius - radius as f32).abs() <= 4.0);

        assert!(detections.get(ColorClass::Orange).is_none());
        assert!(detections.get(ColorClass::Green).is_none());
        Ok(())
    }

    #[test]
    fn small_disc_is_discarded_as_noise() -> Result<()> {
        let mut backend = HsvBallBackend::default();
        // Radius 5 disc: morphology shrinks it and the noise floor drops it.
        let pixels = frame_with_disc(96, 96, PixelPoint::new(48, 48), 5, [30, 60, 220]);
        let detections = backend.detect(&pixels, 96, 96)?;
        assert!(detections.get(ColorClass::Blue).is_none());
        Ok(())
    }

    #[test]
    fn empty_frame_detects_nothing() -> Result<()> {
        let mut backend = HsvBallBackend::default();
        let pixels = frame_with_disc(64, 64, PixelPoint::new(0, 0), 0, GRAY);
        let detections = backend.detect(&pixels, 64, 64)?;
        assert_eq!(detections.detected_count(), 0);
        Ok(())
    }

    #[test]
    fn largest_of_two_discs_wins() -> Result<()> {
        let mut backend = HsvBallBackend::default();
        let mut pixels = frame_with_disc(200, 120, PixelPoint::new(50, 60), 22, [30, 60, 220]);
        // Second, smaller blue disc.
        let small = frame_with_disc(200, 120, PixelPoint::new(150, 60), 14, [30, 60, 220]);
        for (dst, src) in pixels.chunks_exact_mut(3).zip(small.chunks_exact(3)) {
            if src != GRAY {
                dst.copy_from_slice(src);
            }
        }

        let detections = backend.detect(&pixels, 200, 120)?;
        let sighting = detections.get(ColorClass::Blue).expect("disc detected");
        assert!(sighting.center.x < 100, "larger disc should be selected");
        Ok(())
    }

    #[test]
    fn rejects_mismatched_buffer_length() {
        let mut backend = HsvBallBackend::default();
        assert!(backend.detect(&[0u8; 10], 64, 64).is_err());
    }
}

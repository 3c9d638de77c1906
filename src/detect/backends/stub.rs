//! Scripted detector backend.
//!
//! Produces deterministic sightings without looking at pixel content: the
//! three balls oscillate vertically, driven by an internal frame counter.
//! Lets the panel and the tick loop run without any real detection work.

use anyhow::Result;

use crate::detect::backend::DetectorBackend;
use crate::detect::result::{BallSighting, FrameDetections};
use crate::{ColorClass, PixelPoint};

const SCRIPT_PERIOD: u64 = 120;
const SCRIPTED_RADIUS: f32 = 15.0;

#[derive(Default)]
pub struct StubBackend {
    frame_count: u64,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DetectorBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _pixels: &[u8], width: u32, height: u32) -> Result<FrameDetections> {
        let mut detections = FrameDetections::default();
        for class in ColorClass::ALL {
            let phase =
                self.frame_count as f64 / SCRIPT_PERIOD as f64 + class.index() as f64 / 3.0;
            let y = height as f64 / 2.0
                + height as f64 * 0.35 * (phase * std::f64::consts::TAU).sin();
            let x = (class.index() as u32 + 1) * width / 4;
            detections.set(
                class,
                Some(BallSighting {
                    center: PixelPoint::new(x, y.round().max(0.0) as u32),
                    radius: SCRIPTED_RADIUS,
                }),
            );
        }
        self.frame_count += 1;
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_backend_reports_all_three_balls() {
        let mut backend = StubBackend::new();
        let detections = backend.detect(&[], 640, 480).unwrap();
        assert_eq!(detections.detected_count(), 3);
        for (_, sighting) in detections.iter() {
            let sighting = sighting.unwrap();
            assert!(sighting.center.y < 480);
            assert_eq!(sighting.radius, SCRIPTED_RADIUS);
        }
    }

    #[test]
    fn stub_backend_moves_between_frames() {
        let mut backend = StubBackend::new();
        let first = backend.detect(&[], 640, 480).unwrap();
        let mut moved = false;
        for _ in 0..10 {
            let next = backend.detect(&[], 640, 480).unwrap();
            if next != first {
                moved = true;
            }
        }
        assert!(moved);
    }
}

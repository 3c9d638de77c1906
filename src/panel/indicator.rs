//! Ball position to indicator mapping.
//!
//! A ball's frame y-coordinate maps to a 0..=100 % reading (higher on
//! screen = higher percentage) and to a canvas position for its indicator
//! circle. Absent detections read 0 % and park the indicator at the canvas
//! bottom.

use crate::detect::FrameDetections;
use crate::ColorClass;

/// Percentage for a ball at frame-y `y`: 100 at the top of the frame, 0 at
/// the bottom, clamped and rounded to the nearest integer.
pub fn percent_from_y(y: u32, frame_height: u32) -> u8 {
    if frame_height == 0 {
        return 0;
    }
    let normalized = (y as f32 / frame_height as f32).clamp(0.0, 1.0);
    ((1.0 - normalized) * 100.0).round() as u8
}

/// Canvas y-coordinate for a ball at frame-y `y`: the frame's vertical span
/// maps directly onto the canvas, clamped to its edges.
pub fn canvas_y(y: u32, frame_height: u32, canvas_height: u32) -> f32 {
    if frame_height == 0 {
        return canvas_height as f32;
    }
    let normalized = (y as f32 / frame_height as f32).clamp(0.0, 1.0);
    normalized * canvas_height as f32
}

/// Arithmetic mean of the three percentages, rounded to nearest integer.
pub fn breathing_average(percents: [u8; 3]) -> u8 {
    let sum: u32 = percents.iter().map(|&p| p as u32).sum();
    (sum as f32 / 3.0).round() as u8
}

/// The per-frame readout shown on the panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BreathingReadout {
    percents: [u8; 3],
}

impl BreathingReadout {
    pub fn from_detections(detections: &FrameDetections, frame_height: u32) -> Self {
        let mut percents = [0u8; 3];
        for (class, sighting) in detections.iter() {
            percents[class.index()] = sighting
                .map(|s| percent_from_y(s.center.y, frame_height))
                .unwrap_or(0);
        }
        Self { percents }
    }

    pub fn percent(&self, class: ColorClass) -> u8 {
        self.percents[class.index()]
    }

    pub fn percents(&self) -> [u8; 3] {
        self.percents
    }

    pub fn average(&self) -> u8 {
        breathing_average(self.percents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::BallSighting;
    use crate::PixelPoint;

    #[test]
    fn percent_clamps_at_both_ends() {
        assert_eq!(percent_from_y(0, 480), 100);
        assert_eq!(percent_from_y(480, 480), 0);
        // y past the frame bottom still reads 0.
        assert_eq!(percent_from_y(1000, 480), 0);
    }

    #[test]
    fn percent_is_monotonic_in_y() {
        let mut last = 100u8;
        for y in (0..=480).step_by(16) {
            let p = percent_from_y(y, 480);
            assert!(p <= last);
            last = p;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        // y = 237/480 -> 50.625 % -> 51.
        assert_eq!(percent_from_y(237, 480), 51);
        assert_eq!(percent_from_y(240, 480), 50);
    }

    #[test]
    fn canvas_y_maps_frame_span_onto_canvas() {
        assert_eq!(canvas_y(0, 480, 630), 0.0);
        assert_eq!(canvas_y(480, 480, 630), 630.0);
        assert_eq!(canvas_y(240, 480, 630), 315.0);
    }

    #[test]
    fn average_is_the_rounded_mean() {
        assert_eq!(breathing_average([0, 0, 0]), 0);
        assert_eq!(breathing_average([100, 100, 100]), 100);
        // (10 + 20 + 41) / 3 = 23.67 -> 24
        assert_eq!(breathing_average([10, 20, 41]), 24);
        // (1 + 1 + 2) / 3 = 1.33 -> 1
        assert_eq!(breathing_average([1, 1, 2]), 1);
    }

    #[test]
    fn readout_defaults_absent_balls_to_zero() {
        let mut detections = FrameDetections::default();
        detections.set(
            ColorClass::Green,
            Some(BallSighting {
                center: PixelPoint::new(100, 120),
                radius: 14.0,
            }),
        );
        let readout = BreathingReadout::from_detections(&detections, 480);
        assert_eq!(readout.percent(ColorClass::Blue), 0);
        assert_eq!(readout.percent(ColorClass::Orange), 0);
        assert_eq!(readout.percent(ColorClass::Green), 75);
        assert_eq!(readout.average(), breathing_average([0, 0, 75]));
    }
}

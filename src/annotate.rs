//! Debug overlay for captured frames.
//!
//! Draws the fitted circle and a color label straight into the RGB buffer,
//! mirroring what the detection pipeline saw. Used by the demo and by the
//! daemon's snapshot output; the pipeline itself never reads these pixels.

use crate::detect::FrameDetections;
use crate::font;
use crate::frame::Frame;

const CIRCLE_THICKNESS: f32 = 2.0;
const LABEL_SCALE: u32 = 1;

/// Stroke a circle outline onto an RGB24 buffer.
pub fn draw_circle_outline(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    cx: i64,
    cy: i64,
    radius: f32,
    color: [u8; 3],
) {
    let r_outer = radius + CIRCLE_THICKNESS / 2.0;
    let r_inner = (radius - CIRCLE_THICKNESS / 2.0).max(0.0);
    let bound = r_outer.ceil() as i64;
    for dy in -bound..=bound {
        for dx in -bound..=bound {
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            if dist >= r_inner && dist <= r_outer {
                font::put_pixel(buffer, width, height, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Overlay every sighting in `detections` onto the frame: a circle outline
/// at the fit plus the class label above-left, both in the class draw color.
pub fn annotate_detections(frame: &mut Frame, detections: &FrameDetections) {
    let width = frame.width();
    let height = frame.height();
    for (class, sighting) in detections.iter() {
        let Some(sighting) = sighting else {
            continue;
        };
        let cx = sighting.center.x as i64;
        let cy = sighting.center.y as i64;
        let color = class.draw_color();
        draw_circle_outline(
            frame.pixels_mut(),
            width,
            height,
            cx,
            cy,
            sighting.radius,
            color,
        );
        let r = sighting.radius.round() as i64;
        font::draw_text_line(
            frame.pixels_mut(),
            width,
            height,
            cx - r,
            cy - r - (font::GLYPH_HEIGHT as i64 + 2),
            class.label(),
            color,
            LABEL_SCALE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::BallSighting;
    use crate::{ColorClass, PixelPoint};

    #[test]
    fn circle_outline_leaves_center_untouched() {
        let mut buffer = vec![0u8; 64 * 64 * 3];
        draw_circle_outline(&mut buffer, 64, 64, 32, 32, 10.0, [255, 165, 0]);
        let center = ((32 * 64 + 32) * 3) as usize;
        assert_eq!(&buffer[center..center + 3], &[0, 0, 0]);
        // A point on the circle is painted.
        let on_ring = ((32 * 64 + 42) * 3) as usize;
        assert_eq!(&buffer[on_ring..on_ring + 3], &[255, 165, 0]);
    }

    #[test]
    fn annotation_changes_the_frame() {
        let mut frame = Frame::from_rgb(vec![0u8; 128 * 96 * 3], 128, 96).unwrap();
        let mut detections = FrameDetections::default();
        detections.set(
            ColorClass::Green,
            Some(BallSighting {
                center: PixelPoint::new(64, 48),
                radius: 12.0,
            }),
        );
        annotate_detections(&mut frame, &detections);
        assert!(frame.pixels().iter().any(|&b| b != 0));
    }

    #[test]
    fn empty_detections_draw_nothing() {
        let mut frame = Frame::from_rgb(vec![7u8; 32 * 32 * 3], 32, 32).unwrap();
        annotate_detections(&mut frame, &FrameDetections::default());
        assert!(frame.pixels().iter().all(|&b| b == 7));
    }
}

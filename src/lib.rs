//! spiro-vision
//!
//! This crate implements the vision core for a three-ball breathing trainer.
//!
//! # Architecture
//!
//! Each tick of the cooperative loop runs one frame through a fixed pipeline:
//!
//! 1. **Capture**: a frame source produces a mirrored RGB24 frame.
//! 2. **Blur**: 11×11 Gaussian smoothing before color analysis.
//! 3. **Mask**: per-color HSV in-range thresholding.
//! 4. **Cleanup**: morphological open + close (5×5 kernel, two iterations).
//! 5. **Select**: largest connected blob, minimum enclosing circle, noise
//!    floor on the fitted radius.
//! 6. **Map**: ball y-coordinates become 0..=100 % readings and indicator
//!    positions on the panel.
//!
//! Detections carry no memory between frames; a ball that vanishes reads 0 %.
//!
//! # Module Structure
//!
//! - `frame`: RGB24 frame container
//! - `ingest`: frame sources (synthetic, image files)
//! - `detect`: the HSV ball detection pipeline
//! - `panel`: ruler/indicator geometry, percentage mapping, panel rendering
//! - `app`: the tick loop tying capture, detection, and the readout together

use serde::{Deserialize, Serialize};

pub mod annotate;
pub mod app;
pub mod config;
pub mod detect;
pub mod font;
pub mod frame;
pub mod ingest;
pub mod panel;

pub use config::TrainerConfig;
pub use detect::{BallSighting, DetectorBackend, FrameDetections, HsvBallBackend, StubBackend};
pub use frame::Frame;
pub use ingest::{CameraConfig, CameraSource, FileConfig, FileSource};
pub use panel::{breathing_average, canvas_y, percent_from_y, BreathingReadout, PanelRenderer};

/// Inclusive HSV bounds in the 8-bit OpenCV convention: hue 0..=180,
/// saturation and value 0..=255.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// True when all three channels fall inside the bounds.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }
}

/// The three ball classes the trainer tracks. Each class carries a static HSV
/// range and a fixed RGB draw color for annotations and the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorClass {
    Blue,
    Orange,
    Green,
}

impl ColorClass {
    pub const ALL: [ColorClass; 3] = [ColorClass::Blue, ColorClass::Orange, ColorClass::Green];

    pub fn label(&self) -> &'static str {
        match self {
            ColorClass::Blue => "Blue",
            ColorClass::Orange => "Orange",
            ColorClass::Green => "Green",
        }
    }

    /// HSV detection range for this class.
    pub fn hsv_range(&self) -> HsvRange {
        match self {
            ColorClass::Blue => HsvRange::new([94, 80, 2], [126, 255, 255]),
            ColorClass::Orange => HsvRange::new([10, 100, 20], [25, 255, 255]),
            ColorClass::Green => HsvRange::new([35, 100, 20], [85, 255, 255]),
        }
    }

    /// RGB color used for annotations and the panel indicator fill.
    pub fn draw_color(&self) -> [u8; 3] {
        match self {
            ColorClass::Blue => [0, 0, 255],
            ColorClass::Orange => [255, 165, 0],
            ColorClass::Green => [0, 100, 0],
        }
    }

    /// Stable index into per-class arrays.
    pub fn index(&self) -> usize {
        match self {
            ColorClass::Blue => 0,
            ColorClass::Orange => 1,
            ColorClass::Green => 2,
        }
    }
}

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

//! Frame ingestion sources.
//!
//! This module provides the sources a trainer session can capture from:
//! - Synthetic scenes (`stub://` devices, used by tests and the demo)
//! - Local image files (`file://` devices, a still or a directory of stills)
//!
//! Real capture devices (`/dev/video*`) are recognized by the config layer
//! but rejected here; no camera driver is built into this crate.
//!
//! All sources produce mirrored RGB24 `Frame` instances. The ingestion layer
//! is responsible for:
//! - Normalizing pixel formats to RGB24 with validated lengths
//! - Mirroring frames at capture (the trainer shows a selfie view)
//! - Pacing capture to the configured target rate

mod normalize;

pub mod camera;
pub mod file;

pub use camera::{CameraConfig, CameraSource, CameraStats};
pub use file::{FileConfig, FileSource};
pub(crate) use normalize::{normalize_to_rgb, PixelFormat};

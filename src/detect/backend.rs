use anyhow::Result;

use crate::detect::result::FrameDetections;

/// Detector backend trait.
///
/// A backend turns one RGB24 frame into per-color ball sightings.
/// Implementations must treat the pixel slice as read-only and ephemeral;
/// detection is stateless across frames beyond whatever counters a backend
/// keeps for its own scripting.
pub trait DetectorBackend: Send {
    /// Backend identifier, as used by the `detect.backend` config key.
    fn name(&self) -> &'static str;

    /// Run detection on a frame.
    fn detect(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<FrameDetections>;
}

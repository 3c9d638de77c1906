//! Camera frame source.
//!
//! `CameraSource` resolves a device string to a capture backend. The only
//! built-in backend is the synthetic scene generator behind `stub://`
//! devices; real capture paths (`/dev/video*`) are rejected with a
//! descriptive error so callers can fall back or fail loudly.
//!
//! The synthetic scene is fully deterministic in the frame counter: three
//! saturated discs (blue, orange, green) bob up and down over a neutral gray
//! background, which exercises the whole detection pipeline without
//! hardware.

use anyhow::{anyhow, Result};

use crate::frame::Frame;
use crate::ingest::{normalize_to_rgb, PixelFormat};

/// Configuration for a camera source.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Device string (e.g. "stub://trainer").
    pub device: String,
    /// Target frame rate (frames per second).
    pub target_fps: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "stub://trainer".to_string(),
            target_fps: 30,
            width: 640,
            height: 480,
        }
    }
}

/// Camera frame source.
pub struct CameraSource {
    backend: CameraBackend,
}

enum CameraBackend {
    Synthetic(SyntheticCamera),
}

impl CameraSource {
    pub fn new(config: CameraConfig) -> Result<Self> {
        if config.device.starts_with("stub://") {
            Ok(Self {
                backend: CameraBackend::Synthetic(SyntheticCamera::new(config)),
            })
        } else {
            Err(anyhow!(
                "no capture driver built in for '{}'; use a stub:// or file:// device",
                config.device
            ))
        }
    }

    /// Open the device.
    pub fn connect(&mut self) -> Result<()> {
        match &mut self.backend {
            CameraBackend::Synthetic(camera) => camera.connect(),
        }
    }

    /// Capture the next frame, normalized to RGB24 and mirrored.
    pub fn next_frame(&mut self) -> Result<Frame> {
        match &mut self.backend {
            CameraBackend::Synthetic(camera) => camera.next_frame(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        match &self.backend {
            CameraBackend::Synthetic(camera) => camera.is_healthy(),
        }
    }

    pub fn stats(&self) -> CameraStats {
        match &self.backend {
            CameraBackend::Synthetic(camera) => camera.stats(),
        }
    }

    /// Release the device. Idempotent.
    pub fn release(&mut self) {
        match &mut self.backend {
            CameraBackend::Synthetic(camera) => camera.release(),
        }
    }
}

/// Statistics for a camera source.
#[derive(Clone, Debug)]
pub struct CameraStats {
    pub frames_captured: u64,
    pub device: String,
}

// ----------------------------------------------------------------------------
// Synthetic camera (stub://)
// ----------------------------------------------------------------------------

/// Disc radius in the synthetic scene, comfortably above the noise floor.
pub const SYNTHETIC_DISC_RADIUS: u32 = 24;

/// Frames per full oscillation of a synthetic disc.
const OSCILLATION_PERIOD: u64 = 120;

const BACKGROUND_GRAY: u8 = 60;

/// Scene colors, chosen to sit inside the three detection ranges once
/// converted to HSV.
const DISC_COLORS: [[u8; 3]; 3] = [[30, 60, 220], [230, 140, 30], [40, 190, 40]];

struct SyntheticCamera {
    config: CameraConfig,
    frame_count: u64,
    connected: bool,
}

impl SyntheticCamera {
    fn new(config: CameraConfig) -> Self {
        Self {
            config,
            frame_count: 0,
            connected: false,
        }
    }

    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        log::info!(
            "camera: opened {} (synthetic, {}x{})",
            self.config.device,
            self.config.width,
            self.config.height
        );
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame> {
        if !self.connected {
            return Err(anyhow!("camera not connected"));
        }
        // The synthetic device speaks YUYV like the webcam it stands in for.
        let yuyv = encode_yuyv(&self.render_scene(), self.config.width, self.config.height)?;
        self.frame_count += 1;

        let rgb = normalize_to_rgb(&yuyv, self.config.width, self.config.height, PixelFormat::Yuyv)?;
        let mut frame = Frame::from_rgb(rgb, self.config.width, self.config.height)?;
        frame.mirror();
        Ok(frame)
    }

    /// Positions of the three discs for the current frame counter.
    fn disc_centers(&self) -> [(i64, i64); 3] {
        let w = self.config.width as i64;
        let h = self.config.height as i64;
        let amplitude = (h as f64) * 0.35;
        let mut centers = [(0i64, 0i64); 3];
        for (i, center) in centers.iter_mut().enumerate() {
            let phase = self.frame_count as f64 / OSCILLATION_PERIOD as f64 + i as f64 / 3.0;
            let y = h as f64 / 2.0 + amplitude * (phase * std::f64::consts::TAU).sin();
            *center = ((i as i64 + 1) * w / 4, y.round() as i64);
        }
        centers
    }

    fn render_scene(&self) -> Vec<u8> {
        let w = self.config.width as i64;
        let h = self.config.height as i64;
        let mut pixels = vec![BACKGROUND_GRAY; (w * h * 3) as usize];
        let r = SYNTHETIC_DISC_RADIUS as i64;

        for (i, (cx, cy)) in self.disc_centers().into_iter().enumerate() {
            let color = DISC_COLORS[i];
            for y in (cy - r).max(0)..=(cy + r).min(h - 1) {
                for x in (cx - r).max(0)..=(cx + r).min(w - 1) {
                    let dx = x - cx;
                    let dy = y - cy;
                    if dx * dx + dy * dy <= r * r {
                        let offset = ((y * w + x) * 3) as usize;
                        pixels[offset..offset + 3].copy_from_slice(&color);
                    }
                }
            }
        }
        pixels
    }

    fn is_healthy(&self) -> bool {
        self.connected
    }

    fn stats(&self) -> CameraStats {
        CameraStats {
            frames_captured: self.frame_count,
            device: self.config.device.clone(),
        }
    }

    fn release(&mut self) {
        if self.connected {
            log::info!("camera: released {}", self.config.device);
            self.connected = false;
        }
    }
}

/// Pack an RGB24 buffer into YUYV 4:2:2; pixel pairs share the chroma of
/// their left pixel.
fn encode_yuyv(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    if width % 2 != 0 {
        return Err(anyhow!("YUYV encoding requires an even width"));
    }
    let w = width as usize;
    let h = height as usize;
    let mut yuyv = vec![0u8; w * h * 2];
    for j in 0..h {
        for i in (0..w).step_by(2) {
            let offset = (j * w + i) * 3;
            let r = rgb[offset] as f32;
            let g = rgb[offset + 1] as f32;
            let b = rgb[offset + 2] as f32;
            let r2 = rgb[offset + 3] as f32;
            let g2 = rgb[offset + 4] as f32;
            let b2 = rgb[offset + 5] as f32;

            let y0 = 0.299 * r + 0.587 * g + 0.114 * b;
            let y1 = 0.299 * r2 + 0.587 * g2 + 0.114 * b2;
            let u = -0.169 * r - 0.331 * g + 0.5 * b + 128.0;
            let v = 0.5 * r - 0.419 * g - 0.081 * b + 128.0;

            let base = (j * w + i) * 2;
            yuyv[base] = clamp_to_u8(y0);
            yuyv[base + 1] = clamp_to_u8(u);
            yuyv[base + 2] = clamp_to_u8(y1);
            yuyv[base + 3] = clamp_to_u8(v);
        }
    }
    Ok(yuyv)
}

fn clamp_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_device_produces_frames() -> Result<()> {
        let mut source = CameraSource::new(CameraConfig {
            device: "stub://test".to_string(),
            width: 64,
            height: 48,
            ..CameraConfig::default()
        })?;
        source.connect()?;
        let frame = source.next_frame()?;
        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 48);
        assert_eq!(source.stats().frames_captured, 1);
        Ok(())
    }

    #[test]
    fn capture_before_connect_fails() {
        let mut source = CameraSource::new(CameraConfig {
            device: "stub://test".to_string(),
            ..CameraConfig::default()
        })
        .unwrap();
        assert!(source.next_frame().is_err());
    }

    #[test]
    fn real_devices_are_rejected() {
        let err = CameraSource::new(CameraConfig {
            device: "/dev/video0".to_string(),
            ..CameraConfig::default()
        })
        .err()
        .expect("no capture driver is built in");
        assert!(err.to_string().contains("no capture driver"));
    }

    #[test]
    fn synthetic_colors_survive_the_yuyv_path() -> Result<()> {
        let mut source = CameraSource::new(CameraConfig {
            device: "stub://test".to_string(),
            width: 64,
            height: 48,
            ..CameraConfig::default()
        })?;
        source.connect()?;
        let frame = source.next_frame()?;

        // Frame 0, green disc: column 3w/4 = 48, phase 2/3 of a cycle.
        let phase = 2.0f64 / 3.0;
        let y = (24.0 + 0.35 * 48.0 * (phase * std::f64::consts::TAU).sin()).round() as u32;
        let x = 64 - 1 - 48; // mirrored
        let rgb = frame.rgb_at(x, y);
        for (channel, expected) in rgb.iter().zip(DISC_COLORS[2]) {
            assert!(
                (*channel as i16 - expected as i16).abs() <= 3,
                "channel drifted: {:?} vs {:?}",
                rgb,
                DISC_COLORS[2]
            );
        }
        Ok(())
    }

    #[test]
    fn release_marks_source_unhealthy() -> Result<()> {
        let mut source = CameraSource::new(CameraConfig {
            device: "stub://test".to_string(),
            ..CameraConfig::default()
        })?;
        source.connect()?;
        assert!(source.is_healthy());
        source.release();
        assert!(!source.is_healthy());
        Ok(())
    }
}

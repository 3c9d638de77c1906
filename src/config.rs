use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DEFAULT_CAMERA_DEVICE: &str = "stub://trainer";
const DEFAULT_TARGET_FPS: u32 = 30;
const DEFAULT_FRAME_WIDTH: u32 = 640;
const DEFAULT_FRAME_HEIGHT: u32 = 480;
const DEFAULT_DETECT_BACKEND: &str = "hsv";
const DEFAULT_MIN_RADIUS: f32 = 10.0;
const DEFAULT_SNAPSHOT_EVERY_FRAMES: u32 = 30;
const DEFAULT_LOGO_LEFT: &str = "logo_left.png";
const DEFAULT_LOGO_RIGHT: &str = "logo_right.png";

#[derive(Debug, Deserialize, Default)]
struct TrainerConfigFile {
    camera: Option<CameraConfigFile>,
    detect: Option<DetectConfigFile>,
    panel: Option<PanelConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct CameraConfigFile {
    device: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectConfigFile {
    backend: Option<String>,
    min_radius: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct PanelConfigFile {
    logo_left: Option<PathBuf>,
    logo_right: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    snapshot_every_frames: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub camera: CameraSettings,
    pub detect: DetectSettings,
    pub panel: PanelSettings,
}

#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub device: String,
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct DetectSettings {
    pub backend: String,
    pub min_radius: f32,
}

#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub logo_left: Option<PathBuf>,
    pub logo_right: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub snapshot_every_frames: u32,
}

impl TrainerConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("SPIRO_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: TrainerConfigFile) -> Self {
        let camera = CameraSettings {
            device: file
                .camera
                .as_ref()
                .and_then(|camera| camera.device.clone())
                .unwrap_or_else(|| DEFAULT_CAMERA_DEVICE.to_string()),
            target_fps: file
                .camera
                .as_ref()
                .and_then(|camera| camera.target_fps)
                .unwrap_or(DEFAULT_TARGET_FPS),
            width: file
                .camera
                .as_ref()
                .and_then(|camera| camera.width)
                .unwrap_or(DEFAULT_FRAME_WIDTH),
            height: file
                .camera
                .as_ref()
                .and_then(|camera| camera.height)
                .unwrap_or(DEFAULT_FRAME_HEIGHT),
        };
        let detect = DetectSettings {
            backend: file
                .detect
                .as_ref()
                .and_then(|detect| detect.backend.clone())
                .unwrap_or_else(|| DEFAULT_DETECT_BACKEND.to_string()),
            min_radius: file
                .detect
                .as_ref()
                .and_then(|detect| detect.min_radius)
                .unwrap_or(DEFAULT_MIN_RADIUS),
        };
        let panel = PanelSettings {
            logo_left: Some(
                file.panel
                    .as_ref()
                    .and_then(|panel| panel.logo_left.clone())
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO_LEFT)),
            ),
            logo_right: Some(
                file.panel
                    .as_ref()
                    .and_then(|panel| panel.logo_right.clone())
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO_RIGHT)),
            ),
            output_dir: file
                .panel
                .as_ref()
                .and_then(|panel| panel.output_dir.clone()),
            snapshot_every_frames: file
                .panel
                .and_then(|panel| panel.snapshot_every_frames)
                .unwrap_or(DEFAULT_SNAPSHOT_EVERY_FRAMES),
        };
        Self {
            camera,
            detect,
            panel,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(device) = std::env::var("SPIRO_CAMERA_DEVICE") {
            if !device.trim().is_empty() {
                self.camera.device = device;
            }
        }
        if let Ok(fps) = std::env::var("SPIRO_TARGET_FPS") {
            let fps: u32 = fps
                .parse()
                .map_err(|_| anyhow!("SPIRO_TARGET_FPS must be an integer"))?;
            self.camera.target_fps = fps;
        }
        if let Ok(backend) = std::env::var("SPIRO_DETECT_BACKEND") {
            if !backend.trim().is_empty() {
                self.detect.backend = backend;
            }
        }
        if let Ok(radius) = std::env::var("SPIRO_MIN_RADIUS") {
            let radius: f32 = radius
                .parse()
                .map_err(|_| anyhow!("SPIRO_MIN_RADIUS must be a number of pixels"))?;
            self.detect.min_radius = radius;
        }
        if let Ok(path) = std::env::var("SPIRO_PANEL_OUTPUT_DIR") {
            if !path.trim().is_empty() {
                self.panel.output_dir = Some(PathBuf::from(path));
            }
        }
        if let Ok(path) = std::env::var("SPIRO_LOGO_LEFT") {
            if !path.trim().is_empty() {
                self.panel.logo_left = Some(PathBuf::from(path));
            }
        }
        if let Ok(path) = std::env::var("SPIRO_LOGO_RIGHT") {
            if !path.trim().is_empty() {
                self.panel.logo_right = Some(PathBuf::from(path));
            }
        }
        Ok(())
    }

    fn validate(&mut self) -> Result<()> {
        validate_device(&self.camera.device)?;
        if self.camera.target_fps == 0 {
            return Err(anyhow!("camera target_fps must be >= 1"));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(anyhow!("camera dimensions must be non-zero"));
        }
        if !matches!(self.detect.backend.as_str(), "hsv" | "stub") {
            return Err(anyhow!(
                "unknown detect backend '{}' (expected 'hsv' or 'stub')",
                self.detect.backend
            ));
        }
        if !self.detect.min_radius.is_finite() || self.detect.min_radius < 0.0 {
            return Err(anyhow!("detect min_radius must be a non-negative number"));
        }
        if self.panel.snapshot_every_frames == 0 {
            return Err(anyhow!("panel snapshot_every_frames must be >= 1"));
        }
        Ok(())
    }
}

/// A conforming device string is one of:
/// - `stub://<name>` for the synthetic source
/// - `file://<path>` for image-file replay
/// - an absolute device path such as `/dev/video0` (recognized but rejected
///   at source construction; no capture driver is built in)
pub fn validate_device(device: &str) -> Result<()> {
    static DEVICE_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = DEVICE_RE
        .get_or_init(|| regex::Regex::new(r"^(stub://[a-z0-9_-]{1,64}|file://.+|/.+)$").unwrap());

    if !re.is_match(device) {
        return Err(anyhow!(
            "camera device must be stub://<name>, file://<path>, or an absolute path"
        ));
    }
    Ok(())
}

fn read_config_file(path: &Path) -> Result<TrainerConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_pattern_accepts_known_schemes() {
        assert!(validate_device("stub://trainer").is_ok());
        assert!(validate_device("file:///tmp/frames").is_ok());
        assert!(validate_device("/dev/video0").is_ok());
        assert!(validate_device("rtsp://camera").is_err());
        assert!(validate_device("").is_err());
        assert!(validate_device("stub://UPPER").is_err());
    }

    #[test]
    fn defaults_validate() {
        let mut cfg = TrainerConfig::from_file(TrainerConfigFile::default());
        cfg.validate().expect("defaults must be valid");
        assert_eq!(cfg.camera.device, "stub://trainer");
        assert_eq!(cfg.camera.width, 640);
        assert_eq!(cfg.camera.height, 480);
        assert_eq!(cfg.detect.min_radius, 10.0);
    }
}

//! Image-file frame source.
//!
//! `FileSource` replays local still images as frames: either a single image
//! (repeated every tick) or a directory of images played in sorted order and
//! looped. Useful for reproducing a detection against a saved capture.
//!
//! The file source decodes in-memory only; no frames are written back to
//! disk, and remote URLs are not fetched.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use crate::frame::Frame;

/// Configuration for a file source.
#[derive(Clone, Debug)]
pub struct FileConfig {
    /// Local image file or directory of images.
    pub path: PathBuf,
    /// Target frame rate (frames per second); used by callers for pacing.
    pub target_fps: u32,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            target_fps: 30,
        }
    }
}

/// Image-file frame source.
pub struct FileSource {
    config: FileConfig,
    entries: Vec<PathBuf>,
    next_index: usize,
    frame_count: u64,
    connected: bool,
}

impl FileSource {
    /// Build a file source from a `file://` device string.
    pub fn from_device(device: &str, target_fps: u32) -> Result<Self> {
        let path = device
            .strip_prefix("file://")
            .ok_or_else(|| anyhow!("file source requires a file:// device, got '{}'", device))?;
        Ok(Self::new(FileConfig {
            path: PathBuf::from(path),
            target_fps,
        }))
    }

    pub fn new(config: FileConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            next_index: 0,
            frame_count: 0,
            connected: false,
        }
    }

    /// Scan the configured path and verify at least one decodable entry.
    pub fn connect(&mut self) -> Result<()> {
        let path = self.config.path.clone();
        self.entries = if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(&path)
                .with_context(|| format!("failed to list {}", path.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| is_supported_image(p))
                .collect();
            entries.sort();
            entries
        } else {
            vec![path.clone()]
        };
        if self.entries.is_empty() {
            return Err(anyhow!("no image files found under {}", path.display()));
        }
        self.connected = true;
        log::info!(
            "file source: {} frame(s) from {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    /// Decode the next image, looping at the end of the listing.
    pub fn next_frame(&mut self) -> Result<Frame> {
        if !self.connected {
            return Err(anyhow!("file source not connected"));
        }
        let path = &self.entries[self.next_index];
        self.next_index = (self.next_index + 1) % self.entries.len();

        let decoded = image::open(path)
            .with_context(|| format!("failed to decode {}", path.display()))?
            .to_rgb8();
        let (width, height) = decoded.dimensions();
        let mut frame = Frame::from_rgb(decoded.into_raw(), width, height)?;
        frame.mirror();
        self.frame_count += 1;
        Ok(frame)
    }

    pub fn is_healthy(&self) -> bool {
        self.connected
    }

    pub fn stats(&self) -> FileStats {
        FileStats {
            frames_captured: self.frame_count,
            path: self.config.path.clone(),
        }
    }

    pub fn release(&mut self) {
        self.connected = false;
    }
}

/// Statistics for a file source.
#[derive(Clone, Debug)]
pub struct FileStats {
    pub frames_captured: u64,
    pub path: PathBuf,
}

fn is_supported_image(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("png") | Some("jpg") | Some("jpeg")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_device_requires_file_scheme() {
        assert!(FileSource::from_device("file:///tmp/x.png", 30).is_ok());
        assert!(FileSource::from_device("stub://x", 30).is_err());
    }

    #[test]
    fn connect_fails_on_missing_path() {
        let mut source = FileSource::new(FileConfig {
            path: PathBuf::from("/nonexistent/frames"),
            target_fps: 30,
        });
        assert!(source.connect().is_err() || source.next_frame().is_err());
    }

    #[test]
    fn supported_extensions() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(!is_supported_image(Path::new("a.gif")));
        assert!(!is_supported_image(Path::new("a")));
    }
}

//! The trainer's cooperative loop.
//!
//! One thread, one timer: every tick captures a frame, runs detection, and
//! refreshes the readout. A source that fails to open leaves the loop
//! running degraded (readout pinned to 0 %) with periodic reconnect
//! attempts; a single failed capture is logged and retried on the next
//! tick. Ctrl-C (or any holder of the shutdown flag) stops the loop, which
//! releases the source on the way out.

use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::TrainerConfig;
use crate::detect::{DetectorBackend, FrameDetections, HsvBallBackend, StubBackend};
use crate::ingest::{CameraConfig, CameraSource, FileSource};
use crate::panel::{BreathingReadout, PanelRenderer};

/// Tick cadence of the capture/detect/display loop.
pub const TICK: Duration = Duration::from_millis(10);

const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(5);
const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);

/// Frame source dispatch for the loop.
enum Source {
    Camera(CameraSource),
    File(FileSource),
}

impl Source {
    fn connect(&mut self) -> Result<()> {
        match self {
            Source::Camera(source) => source.connect(),
            Source::File(source) => source.connect(),
        }
    }

    fn next_frame(&mut self) -> Result<crate::Frame> {
        match self {
            Source::Camera(source) => source.next_frame(),
            Source::File(source) => source.next_frame(),
        }
    }

    fn is_healthy(&self) -> bool {
        match self {
            Source::Camera(source) => source.is_healthy(),
            Source::File(source) => source.is_healthy(),
        }
    }

    fn frames_captured(&self) -> u64 {
        match self {
            Source::Camera(source) => source.stats().frames_captured,
            Source::File(source) => source.stats().frames_captured,
        }
    }

    fn release(&mut self) {
        match self {
            Source::Camera(source) => source.release(),
            Source::File(source) => source.release(),
        }
    }
}

/// Resolve a device string to a source. `/dev/...` paths are recognized by
/// config validation but there is no capture driver behind them.
fn build_source(config: &TrainerConfig) -> Result<Source> {
    let device = config.camera.device.as_str();
    if device.starts_with("stub://") {
        Ok(Source::Camera(CameraSource::new(CameraConfig {
            device: device.to_string(),
            target_fps: config.camera.target_fps,
            width: config.camera.width,
            height: config.camera.height,
        })?))
    } else if device.starts_with("file://") {
        Ok(Source::File(FileSource::from_device(
            device,
            config.camera.target_fps,
        )?))
    } else {
        Err(anyhow!(
            "no capture driver built in for '{}'; use a stub:// or file:// device",
            device
        ))
    }
}

fn build_backend(config: &TrainerConfig) -> Result<Box<dyn DetectorBackend>> {
    match config.detect.backend.as_str() {
        "hsv" => Ok(Box::new(HsvBallBackend::new(config.detect.min_radius))),
        "stub" => Ok(Box::new(StubBackend::new())),
        other => Err(anyhow!("unknown detect backend '{}'", other)),
    }
}

pub struct TrainerApp {
    config: TrainerConfig,
    shutdown: Arc<AtomicBool>,
}

impl TrainerApp {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the loop; hand this to a Ctrl-C handler.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Run the loop until the shutdown flag is set.
    pub fn run(&mut self) -> Result<()> {
        let mut backend = build_backend(&self.config)?;
        let mut source = build_source(&self.config)?;
        let panel = PanelRenderer::new(&self.config.panel);

        let mut connected = match source.connect() {
            Ok(()) => true,
            Err(e) => {
                log::error!("source init failed, running degraded: {}", e);
                false
            }
        };

        log::info!(
            "trainer running: device={} backend={} min_radius={}",
            self.config.camera.device,
            backend.name(),
            self.config.detect.min_radius
        );

        let mut frame_index = 0u64;
        let mut last_health_log = Instant::now();
        let mut last_reconnect = Instant::now();

        while !self.shutdown.load(Ordering::Relaxed) {
            if !connected {
                if last_reconnect.elapsed() >= RECONNECT_INTERVAL {
                    last_reconnect = Instant::now();
                    match source.connect() {
                        Ok(()) => {
                            log::info!("source reconnected");
                            connected = true;
                        }
                        Err(e) => log::warn!("source reconnect failed: {}", e),
                    }
                }
                std::thread::sleep(TICK);
                continue;
            }

            let frame = match source.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("frame capture failed: {}", e);
                    std::thread::sleep(TICK);
                    continue;
                }
            };

            let detections = backend.detect(frame.pixels(), frame.width(), frame.height())?;
            let readout = BreathingReadout::from_detections(&detections, frame.height());
            frame_index += 1;

            if last_health_log.elapsed() >= HEALTH_LOG_INTERVAL {
                let percents = readout.percents();
                log::info!(
                    "health={} frames={} blue={}% orange={}% green={}% avg={}%",
                    source.is_healthy(),
                    source.frames_captured(),
                    percents[0],
                    percents[1],
                    percents[2],
                    readout.average()
                );
                last_health_log = Instant::now();
            }

            if let Some(out_dir) = &self.config.panel.output_dir {
                if frame_index % self.config.panel.snapshot_every_frames as u64 == 0 {
                    let buffer = panel.render(&detections, &readout, frame.height());
                    let layout = panel.layout();
                    if let Err(e) = write_snapshot(out_dir, frame_index, &buffer, layout.width, layout.height)
                    {
                        log::warn!("panel snapshot failed: {}", e);
                    }
                }
            }

            std::thread::sleep(TICK);
        }

        source.release();
        log::info!("trainer stopped after {} frames", frame_index);
        Ok(())
    }

    /// Run detection over a fixed number of frames; used by the demo and by
    /// tests that want the loop body without the timer.
    pub fn run_frames(&mut self, frames: u64) -> Result<Vec<(FrameDetections, BreathingReadout)>> {
        let mut backend = build_backend(&self.config)?;
        let mut source = build_source(&self.config)?;
        source.connect()?;

        let mut results = Vec::with_capacity(frames as usize);
        for _ in 0..frames {
            let frame = source.next_frame()?;
            let detections = backend.detect(frame.pixels(), frame.width(), frame.height())?;
            let readout = BreathingReadout::from_detections(&detections, frame.height());
            results.push((detections, readout));
        }
        source.release();
        Ok(results)
    }
}

fn write_snapshot(
    out_dir: &Path,
    frame_index: u64,
    buffer: &[u8],
    width: u32,
    height: u32,
) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("panel_{:08}.png", frame_index));
    image::save_buffer(&path, buffer, width, height, image::ExtendedColorType::Rgb8)?;
    Ok(())
}

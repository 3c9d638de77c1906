//! demo - end-to-end synthetic run for the breathing trainer
//!
//! Captures from the synthetic scene, runs the full detection pipeline, and
//! writes annotated frames plus panel renders as PNGs, ending with a
//! per-ball summary.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use spiro_vision::annotate::annotate_detections;
use spiro_vision::config::PanelSettings;
use spiro_vision::ingest::{CameraConfig, CameraSource};
use spiro_vision::panel::{BreathingReadout, PanelRenderer};
use spiro_vision::{ColorClass, DetectorBackend, HsvBallBackend, StubBackend};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of synthetic frames to process.
    #[arg(long, default_value_t = 30)]
    frames: u64,
    /// Frame width.
    #[arg(long, default_value_t = 320)]
    width: u32,
    /// Frame height.
    #[arg(long, default_value_t = 240)]
    height: u32,
    /// Detector backend ("hsv" or "stub").
    #[arg(long, default_value = "hsv")]
    backend: String,
    /// Write an annotated frame + panel PNG every N frames.
    #[arg(long, default_value_t = 10)]
    snapshot_every: u64,
    /// Output directory for PNG artifacts.
    #[arg(long, default_value = "demo_out")]
    out: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.frames == 0 {
        return Err(anyhow!("frames must be >= 1"));
    }
    if args.snapshot_every == 0 {
        return Err(anyhow!("snapshot_every must be >= 1"));
    }

    let out_dir = PathBuf::from(&args.out);
    std::fs::create_dir_all(&out_dir)?;

    let mut backend: Box<dyn DetectorBackend> = match args.backend.as_str() {
        "hsv" => Box::new(HsvBallBackend::default()),
        "stub" => Box::new(StubBackend::new()),
        other => return Err(anyhow!("unknown backend '{}'", other)),
    };

    stage("open synthetic source");
    let mut source = CameraSource::new(CameraConfig {
        device: "stub://demo".to_string(),
        target_fps: 30,
        width: args.width,
        height: args.height,
    })?;
    source.connect()?;

    let panel = PanelRenderer::new(&PanelSettings {
        logo_left: None,
        logo_right: None,
        output_dir: Some(out_dir.clone()),
        snapshot_every_frames: 30,
    });

    stage("run detection");
    let mut detected_frames = [0u64; 3];
    let mut last_readout = BreathingReadout::default();
    for index in 0..args.frames {
        let mut frame = source.next_frame()?;
        let detections = backend.detect(frame.pixels(), frame.width(), frame.height())?;
        let readout = BreathingReadout::from_detections(&detections, frame.height());

        for (class, sighting) in detections.iter() {
            if sighting.is_some() {
                detected_frames[class.index()] += 1;
            }
        }
        last_readout = readout;

        if index % args.snapshot_every == 0 {
            let layout = panel.layout();
            let buffer = panel.render(&detections, &readout, frame.height());
            image::save_buffer(
                out_dir.join(format!("panel_{:04}.png", index)),
                &buffer,
                layout.width,
                layout.height,
                image::ExtendedColorType::Rgb8,
            )?;

            annotate_detections(&mut frame, &detections);
            image::save_buffer(
                out_dir.join(format!("frame_{:04}.png", index)),
                frame.pixels(),
                frame.width(),
                frame.height(),
                image::ExtendedColorType::Rgb8,
            )?;
        }
    }
    source.release();

    stage("summary");
    for class in ColorClass::ALL {
        println!(
            "{}: detected in {}/{} frames, last reading {}%",
            class.label(),
            detected_frames[class.index()],
            args.frames,
            last_readout.percent(class)
        );
    }
    println!("breathing avg: {}%", last_readout.average());
    println!("artifacts in {}", out_dir.display());
    Ok(())
}

fn stage(name: &str) {
    eprintln!("==> {}", name);
}

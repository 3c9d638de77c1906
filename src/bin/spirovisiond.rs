//! spirovisiond - breathing trainer daemon
//!
//! This daemon:
//! 1. Loads the layered config (file + environment)
//! 2. Opens the configured frame source
//! 3. Runs the HSV ball pipeline on every tick
//! 4. Maps ball positions to the breathing readout
//! 5. Optionally writes panel snapshots to disk
//!
//! Stops on Ctrl-C, releasing the source.

use anyhow::Result;

use spiro_vision::app::TrainerApp;
use spiro_vision::TrainerConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = TrainerConfig::load()?;
    log::info!(
        "spirovisiond {} starting: device={} backend={}",
        env!("CARGO_PKG_VERSION"),
        cfg.camera.device,
        cfg.detect.backend
    );

    let mut app = TrainerApp::new(cfg);
    let shutdown = app.shutdown_flag();
    ctrlc::set_handler(move || {
        log::info!("shutdown requested");
        shutdown.store(true, std::sync::atomic::Ordering::Relaxed);
    })?;

    app.run()
}

//! Hurdle Run entry point
//!
//! Runs a headless session: loads the config, builds the placeholder assets
//! and drives frames at 60 Hz until the runner falls or the frame budget is
//! spent.

use std::env;

use hurdle_run::assets::{RunAssets, demo_bundle};
use hurdle_run::platform::HeadlessHost;
use hurdle_run::sim::Runner;
use hurdle_run::{RunConfig, SetupError};

/// Frame budget when none is given (five minutes at 60 Hz)
const DEFAULT_FRAMES: u64 = 5 * 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Hurdle Run (headless) starting...");

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), SetupError> {
    let mut config = match parse_flag_value(args, "--config") {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if args.iter().any(|a| a == "--autopilot") {
        config.autopilot = true;
    }
    let frames = match parse_flag_value(args, "--frames") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| SetupError::InvalidConfig(format!("--frames `{raw}`: {e}")))?,
        None => DEFAULT_FRAMES,
    };

    let assets = RunAssets::from_bundle(&demo_bundle())?;
    let host = HeadlessHost::default().with_frame_limit(frames);
    let mut runner = Runner::new(config, &assets, host)?;
    let summary = runner.run();

    println!(
        "frames={} distance={:.2} hurdles={}/{} died={}",
        summary.frames,
        summary.distance,
        summary.obstacles_cleared,
        summary.obstacles_spawned,
        summary.died
    );
    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  hurdle-run [--config <file.json>] [--autopilot] [--frames <n>]");
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

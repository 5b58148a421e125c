use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info, warn};
use serde::Serialize;

use depth_fingertips::coordinate_mapping::PinholeMapper;
use depth_fingertips::detector_config::{load_config_from_file, DetectorConfig};
use depth_fingertips::tracking::HandPair;
use depth_fingertips::HandsController;

mod cli;
mod recording;

use crate::cli::{Cli, OutputFormat};
use crate::recording::{list_frames, load_frame};

#[derive(Serialize, Debug)]
struct FrameOutput<'a> {
    frame: &'a str,
    hands: &'a [HandPair],
}

fn write_frame(writer: &mut dyn Write, format: OutputFormat, output: &FrameOutput) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, output)?;
            writeln!(writer)?;
        }
        OutputFormat::MsgPack => {
            let payload = rmp_serde::to_vec_named(output)?;
            writer.write_all(&payload)?;
        }
    }
    Ok(())
}

fn load_mapper(intrinsics_path: Option<&str>) -> Result<PinholeMapper> {
    match intrinsics_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read intrinsics file {}", path))?;
            let mapper = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse intrinsics file {}", path))?;
            info!("Loaded camera intrinsics from \"{}\"", path);
            Ok(mapper)
        }
        None => {
            warn!("No intrinsics file given; using nominal Kinect v2 values");
            Ok(PinholeMapper::default())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger from the environment
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    debug!("Started; args: {:?}", cli);

    if cli.write_default_config {
        return DetectorConfig::default().write_config_to_file(&cli.config_path);
    }

    let recording = cli
        .recording
        .as_deref()
        .ok_or_else(|| anyhow!("a recording directory is required (--recording)"))?;

    let config = load_config_from_file(&cli.config_path)?;
    let mapper = load_mapper(cli.intrinsics_path.as_deref())?;
    let mut controller = HandsController::new(config, mapper)?;

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create output {}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let frames = list_frames(Path::new(recording))?;
    info!("Found {} frames in \"{}\"", frames.len(), recording);

    let started = Instant::now();
    let mut frames_with_hands = 0;

    for depth_path in frames.iter() {
        let frame = match load_frame(depth_path) {
            Ok(f) => f,
            Err(e) => {
                error!("Skipping frame {:?}: {:#}", depth_path, e);
                continue;
            }
        };

        let hands = match controller.update_frame(&frame.depth, &frame.bodies) {
            Ok(hands) => hands,
            Err(e) => {
                error!("Skipping frame \"{}\": {:#}", frame.name, e);
                continue;
            }
        };

        debug!(
            "Frame \"{}\": {} bodies, {} with hands",
            frame.name,
            frame.bodies.len(),
            hands.len()
        );

        if !hands.is_empty() {
            frames_with_hands += 1;
            write_frame(
                writer.as_mut(),
                cli.format,
                &FrameOutput {
                    frame: &frame.name,
                    hands: &hands,
                },
            )?;
        }
    }

    writer.flush()?;

    info!(
        "Processed {} frames in {:?}; hands found in {}",
        frames.len(),
        started.elapsed(),
        frames_with_hands
    );

    Ok(())
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use depth_fingertips::tracking::BodyFrame;

const DEPTH_EXTENSION: &str = "depth";
const BODIES_SUFFIX: &str = ".bodies.json";

pub struct RecordedFrame {
    pub name: String,
    pub depth: Vec<u16>,
    pub bodies: BodyFrame,
}

/// All depth files in the recording directory, sorted by name
pub fn list_frames(recording_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = fs::read_dir(recording_dir)
        .with_context(|| format!("failed to read recording directory {:?}", recording_dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == DEPTH_EXTENSION))
        .collect();
    frames.sort();
    Ok(frames)
}

pub fn load_frame(depth_path: &Path) -> Result<RecordedFrame> {
    let name = depth_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("invalid frame file name {:?}", depth_path))?
        .to_string();

    let bytes =
        fs::read(depth_path).with_context(|| format!("failed to read depth file {:?}", depth_path))?;
    let depth = decode_depth(&bytes)?;

    let bodies_path = depth_path.with_file_name(format!("{}{}", name, BODIES_SUFFIX));
    let text = fs::read_to_string(&bodies_path)
        .with_context(|| format!("failed to read bodies file {:?}", bodies_path))?;
    let bodies: BodyFrame = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse bodies file {:?}", bodies_path))?;

    Ok(RecordedFrame {
        name,
        depth,
        bodies,
    })
}

fn decode_depth(bytes: &[u8]) -> Result<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return Err(anyhow!(
            "depth data has an odd number of bytes ({}); expected u16 samples",
            bytes.len()
        ));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

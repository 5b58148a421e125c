use log::{debug, info, warn};
use std::{fs, io::ErrorKind};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    /// Width (pixels) of incoming depth frames
    pub depth_width: usize,

    /// Height (pixels) of incoming depth frames
    pub depth_height: usize,

    /// Depth samples (mm) below this are treated as invalid readings
    pub min_depth: u16,

    pub max_depth: u16,

    // -------- MASKING SETTINGS
    /// How far (mm) in front of or behind the palm joint a pixel may be
    /// and still count as part of the hand
    pub depth_threshold: f32,

    /// The search box around the palm extends this many times the longer of
    /// palm-to-tip and palm-to-thumb
    pub reach_factor: f32,

    // -------- FINGERTIP SETTINGS
    /// Hull points closer than this (in pixel/mm units) are merged into one
    pub point_merge_distance: f32,

    /// Maximum number of fingertips reported per hand
    pub max_fingertips: usize,

    pub detect_left_hand: bool,
    pub detect_right_hand: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            depth_width: 512,
            depth_height: 424,
            min_depth: 500,
            max_depth: u16::MAX,
            depth_threshold: 80., // 8cm
            reach_factor: 2.,
            point_merge_distance: 18.,
            max_fingertips: 5,
            detect_left_hand: true,
            detect_right_hand: true,
        }
    }
}

impl DetectorConfig {
    pub fn frame_len(&self) -> usize {
        self.depth_width * self.depth_height
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth_width == 0 || self.depth_height == 0 {
            bail!(
                "Depth frame dimensions must be non-zero, got {}x{}",
                self.depth_width,
                self.depth_height
            );
        }
        if self.min_depth > self.max_depth {
            bail!(
                "minDepth ({}) is greater than maxDepth ({})",
                self.min_depth,
                self.max_depth
            );
        }
        if self.depth_threshold <= 0. || self.point_merge_distance <= 0. || self.reach_factor <= 0.
        {
            bail!("depthThreshold, pointMergeDistance and reachFactor must all be above 0");
        }
        if self.max_fingertips == 0 {
            bail!("maxFingertips must be at least 1");
        }
        Ok(())
    }

    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(config_file_path, text)
            .with_context(|| format!("Error writing config to file {}", config_file_path))?;
        info!("Wrote config to file: {:?}", config_file_path);
        Ok(())
    }
}

pub fn load_config_from_file(config_file_path: &str) -> Result<DetectorConfig> {
    let config = match fs::read_to_string(config_file_path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Detector config file not found at {}, using defaults",
                &config_file_path
            );
            DetectorConfig::default()
        }
        Err(e) => {
            return Err(anyhow!(
                "Failed to load detector config from disk; error: {:?}",
                e
            ));
        }
        Ok(s) => {
            info!("Loaded detector config OK from \"{}\"", config_file_path);
            let loaded: DetectorConfig = serde_json::from_str(&s)
                .map_err(|e| anyhow!("Failed to parse config data: {}", e))?;
            debug!("Config parsed data from file: {:?}", &loaded);
            loaded
        }
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.frame_len(), 512 * 424);
        assert_eq!(config.min_depth, 500);
        assert_eq!(config.max_depth, 65535);
        assert_eq!(config.depth_threshold, 80.);
        assert_eq!(config.point_merge_distance, 18.);
        assert_eq!(config.max_fingertips, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{ "depthThreshold": 120, "detectLeftHand": false }"#).unwrap();
        assert_eq!(config.depth_threshold, 120.);
        assert!(!config.detect_left_hand);
        assert!(config.detect_right_hand);
        assert_eq!(config.depth_width, 512);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = DetectorConfig {
            depth_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = DetectorConfig {
            min_depth: 4000,
            max_depth: 1000,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = DetectorConfig {
            max_fingertips: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "depth-fingertips-config-test-{}.json",
            std::process::id()
        ));
        let path = path.to_str().unwrap();
        let config = DetectorConfig {
            point_merge_distance: 25.,
            ..Default::default()
        };
        config.write_config_to_file(path).unwrap();
        let loaded = load_config_from_file(path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let loaded = load_config_from_file("/nonexistent/depth-fingertips.json").unwrap();
        assert_eq!(loaded, DetectorConfig::default());
    }
}

use log::debug;

use crate::{detector_config::DetectorConfig, geometry_utils::distance, tracking::DepthSpacePoint};

/// One hand's joints, already projected onto the depth frame, plus the palm's
/// distance from the sensor (mm)
#[derive(Debug, Clone, Copy)]
pub struct ProjectedHandJoints {
    pub hand: DepthSpacePoint,
    pub wrist: DepthSpacePoint,
    pub tip: DepthSpacePoint,
    pub thumb: DepthSpacePoint,
    pub palm_depth: f32,
}

impl ProjectedHandJoints {
    /// False if the sensor lost track of any of the joints
    pub fn is_trackable(&self) -> bool {
        [self.hand, self.wrist, self.tip, self.thumb]
            .iter()
            .all(|p| p.is_valid())
    }

    /// Radius around the palm within which the hand is searched for
    pub fn reach(&self, reach_factor: f32) -> f32 {
        let to_tip = distance(self.hand.x, self.hand.y, self.tip.x, self.tip.y);
        let to_thumb = distance(self.hand.x, self.hand.y, self.thumb.x, self.thumb.y);
        reach_factor * to_tip.max(to_thumb)
    }
}

/// Inclusive rectangle of pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x_min: usize,
    pub y_min: usize,
    pub x_max: usize,
    pub y_max: usize,
}

/// Boolean buffer the size of the depth frame, marking the pixels which
/// (plausibly) belong to one hand. Reused from frame to frame.
pub struct DepthMask {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    bounds: Option<PixelBounds>,
}

impl DepthMask {
    pub fn new(width: usize, height: usize) -> Self {
        DepthMask {
            width,
            height,
            pixels: vec![false; width * height],
            bounds: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The region that was evaluated during the last update, if any; no pixel
    /// outside it is set
    pub fn bounds(&self) -> Option<PixelBounds> {
        self.bounds
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    pub fn count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
        self.bounds = None;
    }

    /// Recompute the mask for a new frame. Returns false (leaving the mask
    /// empty) if the hand could not be tracked this frame.
    pub fn update(
        &mut self,
        depth_data: &[u16],
        joints: &ProjectedHandJoints,
        config: &DetectorConfig,
    ) -> bool {
        self.clear();

        if !joints.is_trackable() {
            debug!("Hand joints not trackable; skip mask");
            return false;
        }

        let reach = joints.reach(config.reach_factor);
        let min_x = (joints.hand.x - reach) as i64;
        let min_y = (joints.hand.y - reach) as i64;
        let max_x = (joints.hand.x + reach) as i64;
        let max_y = (joints.hand.y + reach) as i64;

        let bounds = match clamp_to_frame(min_x, min_y, max_x, max_y, self.width, self.height) {
            Some(b) => b,
            None => return true,
        };
        self.bounds = Some(bounds);

        let min_band = joints.palm_depth - config.depth_threshold;
        let max_band = joints.palm_depth + config.depth_threshold;

        for y in bounds.y_min..=bounds.y_max {
            let row = y * self.width;
            for x in bounds.x_min..=bounds.x_max {
                let depth = depth_data[row + x];
                let is_in_range = depth >= config.min_depth && depth <= config.max_depth;
                let d = depth as f32;
                self.pixels[row + x] = is_in_range && d >= min_band && d <= max_band;
            }
        }

        true
    }
}

fn clamp_to_frame(
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
    width: usize,
    height: usize,
) -> Option<PixelBounds> {
    let (w, h) = (width as i64, height as i64);
    if max_x < 0 || max_y < 0 || min_x >= w || min_y >= h || min_x > max_x || min_y > max_y {
        return None;
    }
    Some(PixelBounds {
        x_min: min_x.max(0) as usize,
        y_min: min_y.max(0) as usize,
        x_max: max_x.min(w - 1) as usize,
        y_max: max_y.min(h - 1) as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joints_at(x: f32, y: f32, palm_depth: f32) -> ProjectedHandJoints {
        ProjectedHandJoints {
            hand: DepthSpacePoint { x, y },
            wrist: DepthSpacePoint { x, y: y + 5. },
            tip: DepthSpacePoint { x, y: y - 3. },
            thumb: DepthSpacePoint { x: x + 2., y },
            palm_depth,
        }
    }

    fn small_config() -> DetectorConfig {
        DetectorConfig {
            depth_width: 20,
            depth_height: 20,
            ..Default::default()
        }
    }

    #[test]
    fn test_reach_uses_longest_finger() {
        let joints = joints_at(10., 10., 1000.);
        assert_eq!(joints.reach(2.), 6.);
    }

    #[test]
    fn test_mask_respects_box_and_depth_band() {
        let config = small_config();
        let mut data = vec![1000u16; 400];
        data[10 * 20 + 11] = 1200; // outside depth band
        data[10 * 20 + 9] = 300; // below minimum valid depth

        let mut mask = DepthMask::new(20, 20);
        assert!(mask.update(&data, &joints_at(10., 10., 1000.), &config));

        // reach = 6, so box is [4, 16] on both axes
        assert_eq!(
            mask.bounds(),
            Some(PixelBounds {
                x_min: 4,
                y_min: 4,
                x_max: 16,
                y_max: 16
            })
        );
        assert!(mask.is_set(10, 10));
        assert!(mask.is_set(4, 16));
        assert!(!mask.is_set(3, 10));
        assert!(!mask.is_set(10, 17));
        assert!(!mask.is_set(11, 10));
        assert!(!mask.is_set(9, 10));
        assert_eq!(mask.count(), 13 * 13 - 2);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let config = small_config();
        let mut data = vec![0u16; 400];
        data[10 * 20 + 10] = 1080;
        data[10 * 20 + 11] = 920;
        data[10 * 20 + 12] = 1081;

        let mut mask = DepthMask::new(20, 20);
        mask.update(&data, &joints_at(10., 10., 1000.), &config);
        assert!(mask.is_set(10, 10));
        assert!(mask.is_set(11, 10));
        assert!(!mask.is_set(12, 10));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_infinite_joint_skips_hand() {
        let config = small_config();
        let data = vec![1000u16; 400];
        let mut joints = joints_at(10., 10., 1000.);
        joints.wrist.x = f32::NEG_INFINITY;

        let mut mask = DepthMask::new(20, 20);
        assert!(!mask.update(&data, &joints, &config));
        assert_eq!(mask.count(), 0);
        assert!(mask.bounds().is_none());
    }

    #[test]
    fn test_mask_reset_between_frames() {
        let config = small_config();
        let mut mask = DepthMask::new(20, 20);
        mask.update(&vec![1000u16; 400], &joints_at(10., 10., 1000.), &config);
        assert!(mask.count() > 0);

        // Hand moved out of the depth band
        mask.update(&vec![2500u16; 400], &joints_at(10., 10., 1000.), &config);
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_box_clamped_at_frame_edge() {
        let config = small_config();
        let data = vec![1000u16; 400];
        let mut mask = DepthMask::new(20, 20);
        mask.update(&data, &joints_at(1., 1., 1000.), &config);
        let b = mask.bounds().unwrap();
        assert_eq!((b.x_min, b.y_min), (0, 0));
        assert_eq!((b.x_max, b.y_max), (7, 7));
    }
}

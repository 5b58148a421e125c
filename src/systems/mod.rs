pub mod contour;
pub mod convex_hull;
pub mod depth_masking;
pub mod fingertips;
pub mod hand_assembly;
pub mod point_filter;

use contour::find_contour;
use convex_hull::convex_hull;
use depth_masking::{DepthMask, ProjectedHandJoints};
use fingertips::select_fingertips;
use log::debug;
use point_filter::PointFilter;

use crate::{
    detector_config::DetectorConfig,
    geometry_utils::{forearm_angle, DepthPoint},
    tracking::HandSide,
};

/// Contour and fingertip candidates found for one hand, in depth-pixel space
#[derive(Debug, Clone)]
pub struct HandDetection {
    pub contour: Vec<DepthPoint>,
    pub fingertips: Vec<DepthPoint>,
}

/// Runs masking, contour, hull, thinning and fingertip selection for one
/// hand side. Owns that side's mask, which is reused across frames.
pub struct HandDetector {
    side: HandSide,
    mask: DepthMask,
}

impl HandDetector {
    pub fn new(side: HandSide, width: usize, height: usize) -> Self {
        HandDetector {
            side,
            mask: DepthMask::new(width, height),
        }
    }

    pub fn mask(&self) -> &DepthMask {
        &self.mask
    }

    /// None if the hand is untrackable, or no contour / no fingertips were found
    pub fn detect(
        &mut self,
        depth_data: &[u16],
        joints: &ProjectedHandJoints,
        config: &DetectorConfig,
        point_filter: &PointFilter,
    ) -> Option<HandDetection> {
        if !self.mask.update(depth_data, joints, config) {
            return None;
        }

        let contour = find_contour(&self.mask, depth_data);
        let hull = convex_hull(&contour);
        let thinned = point_filter.filter(&hull);

        let wrist = (joints.wrist.x, joints.wrist.y);
        let angle = forearm_angle(wrist, (joints.hand.x, joints.hand.y));
        let fingertips = select_fingertips(&thinned, wrist, angle, config.max_fingertips);

        debug!(
            "{:?} hand: {} contour points, {} on hull, {} after thinning, {} fingertips (angle {:.1})",
            self.side,
            contour.len(),
            hull.len(),
            thinned.len(),
            fingertips.len(),
            angle
        );

        if contour.is_empty() || fingertips.is_empty() {
            None
        } else {
            Some(HandDetection {
                contour,
                fingertips,
            })
        }
    }
}

pub struct Systems {
    pub left: HandDetector,
    pub right: HandDetector,
    pub point_filter: PointFilter,
}

impl Systems {
    pub fn new(config: &DetectorConfig) -> Systems {
        Systems {
            left: HandDetector::new(HandSide::Left, config.depth_width, config.depth_height),
            right: HandDetector::new(HandSide::Right, config.depth_width, config.depth_height),
            point_filter: PointFilter::new(config.point_merge_distance),
        }
    }
}

use std::time::Instant;

use anyhow::{bail, Result};
use log::debug;

use crate::{
    coordinate_mapping::CoordinateMapper,
    detector_config::DetectorConfig,
    systems::{depth_masking::ProjectedHandJoints, hand_assembly::assemble_hand, Systems},
    tracking::{Body, Hand, HandPair, HandSide},
};

/// Detects hands (contours and fingertips) of tracked bodies, one depth frame
/// at a time
pub struct HandsController<M: CoordinateMapper> {
    config: DetectorConfig,
    mapper: M,
    systems: Systems,
}

impl<M: CoordinateMapper> HandsController<M> {
    pub fn new(config: DetectorConfig, mapper: M) -> Result<Self> {
        config.validate()?;
        let systems = Systems::new(&config);
        Ok(HandsController {
            config,
            mapper,
            systems,
        })
    }

    fn check_frame(&self, depth_data: &[u16]) -> Result<()> {
        if depth_data.len() != self.config.frame_len() {
            bail!(
                "Depth frame has {} samples, expected {}x{} = {}",
                depth_data.len(),
                self.config.depth_width,
                self.config.depth_height,
                self.config.frame_len()
            );
        }
        Ok(())
    }

    /// Look for the hands of a single body. Returns `Ok(None)` when neither
    /// hand was found this frame; a depth buffer of the wrong size is an error.
    pub fn update(&mut self, depth_data: &[u16], body: &Body) -> Result<Option<HandPair>> {
        self.check_frame(depth_data)?;
        Ok(self.update_body(depth_data, body))
    }

    /// Look for hands of every tracked body in the frame. Bodies without any
    /// detected hand are left out; order is preserved.
    pub fn update_frame(&mut self, depth_data: &[u16], bodies: &[Body]) -> Result<Vec<HandPair>> {
        self.check_frame(depth_data)?;
        Ok(bodies
            .iter()
            .filter_map(|body| self.update_body(depth_data, body))
            .collect())
    }

    fn update_body(&mut self, depth_data: &[u16], body: &Body) -> Option<HandPair> {
        if !body.is_tracked {
            return None;
        }
        let started = Instant::now();

        let hand_left = if self.config.detect_left_hand {
            self.detect_hand(depth_data, body, HandSide::Left)
        } else {
            None
        };
        let hand_right = if self.config.detect_right_hand {
            self.detect_hand(depth_data, body, HandSide::Right)
        } else {
            None
        };

        debug!(
            "Body {}: left {}, right {} in {:?}",
            body.tracking_id,
            hand_left.is_some(),
            hand_right.is_some(),
            started.elapsed()
        );

        if hand_left.is_none() && hand_right.is_none() {
            return None;
        }
        Some(HandPair {
            tracking_id: body.tracking_id,
            hand_left,
            hand_right,
        })
    }

    fn project_joints(&self, body: &Body, side: HandSide) -> Option<ProjectedHandJoints> {
        let types = side.joint_types();
        let hand = body.joint(types.hand)?;
        let wrist = body.joint(types.wrist)?;
        let tip = body.joint(types.tip)?;
        let thumb = body.joint(types.thumb)?;

        Some(ProjectedHandJoints {
            hand: self.mapper.camera_to_depth(hand),
            wrist: self.mapper.camera_to_depth(wrist),
            tip: self.mapper.camera_to_depth(tip),
            thumb: self.mapper.camera_to_depth(thumb),
            palm_depth: hand.z * 1000., // m to mm
        })
    }

    fn detect_hand(&mut self, depth_data: &[u16], body: &Body, side: HandSide) -> Option<Hand> {
        let Some(joints) = self.project_joints(body, side) else {
            debug!(
                "Body {}: {:?} hand joints missing; skip",
                body.tracking_id, side
            );
            return None;
        };

        let detector = match side {
            HandSide::Left => &mut self.systems.left,
            HandSide::Right => &mut self.systems.right,
        };
        let detection = detector.detect(
            depth_data,
            &joints,
            &self.config,
            &self.systems.point_filter,
        )?;

        Some(assemble_hand(
            body.tracking_id,
            body.hand_state(side),
            &detection.contour,
            &detection.fingertips,
            &self.mapper,
        ))
    }
}

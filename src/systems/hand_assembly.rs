use crate::{
    coordinate_mapping::CoordinateMapper,
    geometry_utils::DepthPoint,
    tracking::{DepthSpacePoint, Finger, Hand, HandState},
};

fn to_depth_space(p: &DepthPoint) -> DepthSpacePoint {
    DepthSpacePoint { x: p.x, y: p.y }
}

fn map_finger(point: &DepthPoint, mapper: &dyn CoordinateMapper) -> Finger {
    let depth_point = to_depth_space(point);
    Finger {
        depth_point,
        camera_point: mapper.depth_to_camera(&depth_point, point.depth()),
        color_point: mapper.depth_to_color(&depth_point, point.depth()),
    }
}

/// Package one hand's contour and fingertips, mapped into camera and colour
/// space. Fingers are only reported for an open hand.
pub fn assemble_hand(
    tracking_id: u64,
    state: HandState,
    contour: &[DepthPoint],
    fingertips: &[DepthPoint],
    mapper: &dyn CoordinateMapper,
) -> Hand {
    let fingers = if state == HandState::Open {
        fingertips.iter().map(|p| map_finger(p, mapper)).collect()
    } else {
        Vec::new()
    };

    let contour_depth: Vec<DepthSpacePoint> = contour.iter().map(to_depth_space).collect();
    let contour_camera = contour_depth
        .iter()
        .zip(contour)
        .map(|(d, p)| mapper.depth_to_camera(d, p.depth()))
        .collect();
    let contour_color = contour_depth
        .iter()
        .zip(contour)
        .map(|(d, p)| mapper.depth_to_color(d, p.depth()))
        .collect();

    Hand {
        tracking_id,
        state,
        fingers,
        contour_depth,
        contour_camera,
        contour_color,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::tracking::{CameraPoint, ColorSpacePoint};

    use super::*;

    /// Counts calls, and encodes the input in the output so order can be checked
    #[derive(Default)]
    struct CountingMapper {
        calls: Cell<usize>,
    }

    impl CoordinateMapper for CountingMapper {
        fn camera_to_depth(&self, point: &CameraPoint) -> DepthSpacePoint {
            DepthSpacePoint {
                x: point.x,
                y: point.y,
            }
        }

        fn depth_to_camera(&self, point: &DepthSpacePoint, depth: u16) -> CameraPoint {
            self.calls.set(self.calls.get() + 1);
            CameraPoint {
                x: point.x,
                y: point.y,
                z: depth as f32,
            }
        }

        fn depth_to_color(&self, point: &DepthSpacePoint, _depth: u16) -> ColorSpacePoint {
            self.calls.set(self.calls.get() + 1);
            ColorSpacePoint {
                x: point.x * 2.,
                y: point.y * 2.,
            }
        }
    }

    fn contour() -> Vec<DepthPoint> {
        vec![
            DepthPoint::new(1., 2., 900.),
            DepthPoint::new(3., 4., 901.),
            DepthPoint::new(5., 6., 902.),
        ]
    }

    #[test]
    fn test_open_hand_keeps_fingers() {
        let mapper = CountingMapper::default();
        let tips = [DepthPoint::new(3., 4., 901.)];
        let hand = assemble_hand(42, HandState::Open, &contour(), &tips, &mapper);

        assert_eq!(hand.tracking_id, 42);
        assert_eq!(hand.fingers.len(), 1);
        assert_eq!(hand.fingers[0].depth_point, DepthSpacePoint { x: 3., y: 4. });
        assert_eq!(hand.fingers[0].camera_point.z, 901.);
        assert_eq!(hand.fingers[0].color_point, ColorSpacePoint { x: 6., y: 8. });
        // one camera + one colour mapping per point
        assert_eq!(mapper.calls.get(), 2 * (3 + 1));
    }

    #[test]
    fn test_closed_hand_has_no_fingers() {
        let mapper = CountingMapper::default();
        let tips = contour();
        for state in [
            HandState::Closed,
            HandState::Lasso,
            HandState::Unknown,
            HandState::NotTracked,
        ] {
            let hand = assemble_hand(1, state, &contour(), &tips, &mapper);
            assert!(hand.fingers.is_empty());
            assert_eq!(hand.contour_depth.len(), 3);
        }
    }

    #[test]
    fn test_contour_order_preserved() {
        let mapper = CountingMapper::default();
        let hand = assemble_hand(1, HandState::Closed, &contour(), &[], &mapper);
        let depths: Vec<f32> = hand.contour_camera.iter().map(|c| c.z).collect();
        assert_eq!(depths, vec![900., 901., 902.]);
        assert_eq!(hand.contour_color[2], ColorSpacePoint { x: 10., y: 12. });
        assert_eq!(hand.contour_depth[0], DepthSpacePoint { x: 1., y: 2. });
    }
}

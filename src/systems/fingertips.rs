use crate::geometry_utils::DepthPoint;

/// Which side of the wrist the fingers are expected on, derived from the
/// forearm angle (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerDirection {
    /// Hand "up": fingers above the wrist
    Up,
    /// Fingers to the right of the wrist (the thumb sometimes dips below it)
    Right,
    Down,
    Left,
}

impl FingerDirection {
    pub fn from_angle(angle: f32) -> Self {
        if angle > -90. && angle < 30. {
            FingerDirection::Up
        } else if (30. ..90.).contains(&angle) {
            FingerDirection::Right
        } else if (90. ..180.).contains(&angle) {
            FingerDirection::Down
        } else {
            FingerDirection::Left
        }
    }

    fn is_beyond_wrist(&self, p: &DepthPoint, wrist: (f32, f32)) -> bool {
        let (wrist_x, wrist_y) = wrist;
        match self {
            FingerDirection::Up => p.y < wrist_y,
            FingerDirection::Right => p.x > wrist_x,
            FingerDirection::Down => p.y > wrist_y,
            FingerDirection::Left => p.x < wrist_x,
        }
    }
}

/// Pick fingertip candidates from a thinned hull: the first `max_count`
/// points (in hull order) lying beyond the wrist in the direction the forearm
/// points.
pub fn select_fingertips(
    hull: &[DepthPoint],
    wrist: (f32, f32),
    angle: f32,
    max_count: usize,
) -> Vec<DepthPoint> {
    let direction = FingerDirection::from_angle(angle);
    hull.iter()
        .filter(|p| direction.is_beyond_wrist(p, wrist))
        .take(max_count)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> DepthPoint {
        DepthPoint::new(x, y, 1000.)
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(FingerDirection::from_angle(0.), FingerDirection::Up);
        assert_eq!(FingerDirection::from_angle(-89.9), FingerDirection::Up);
        assert_eq!(FingerDirection::from_angle(-90.), FingerDirection::Left);
        assert_eq!(FingerDirection::from_angle(29.9), FingerDirection::Up);
        assert_eq!(FingerDirection::from_angle(30.), FingerDirection::Right);
        assert_eq!(FingerDirection::from_angle(89.9), FingerDirection::Right);
        assert_eq!(FingerDirection::from_angle(90.), FingerDirection::Down);
        assert_eq!(FingerDirection::from_angle(179.9), FingerDirection::Down);
        assert_eq!(FingerDirection::from_angle(180.), FingerDirection::Left);
        assert_eq!(FingerDirection::from_angle(-150.), FingerDirection::Left);
    }

    #[test]
    fn test_each_direction_filters_by_wrist() {
        let hull = [p(10., 10.), p(30., 10.), p(30., 30.), p(10., 30.)];
        let wrist = (20., 20.);
        assert_eq!(
            select_fingertips(&hull, wrist, 0., 5),
            vec![p(10., 10.), p(30., 10.)]
        );
        assert_eq!(
            select_fingertips(&hull, wrist, 45., 5),
            vec![p(30., 10.), p(30., 30.)]
        );
        assert_eq!(
            select_fingertips(&hull, wrist, 120., 5),
            vec![p(30., 30.), p(10., 30.)]
        );
        assert_eq!(
            select_fingertips(&hull, wrist, -120., 5),
            vec![p(10., 10.), p(10., 30.)]
        );
    }

    #[test]
    fn test_takes_first_in_hull_order() {
        let hull: Vec<DepthPoint> = (0..8).map(|i| p(i as f32 * 20., 0.)).collect();
        let tips = select_fingertips(&hull, (0., 100.), 0., 5);
        assert_eq!(tips, hull[..5].to_vec());
        for tip in tips.iter() {
            assert!(hull.contains(tip));
        }
    }

    #[test]
    fn test_nothing_beyond_wrist() {
        let hull = [p(10., 50.), p(30., 60.)];
        assert!(select_fingertips(&hull, (20., 20.), 0., 5).is_empty());
    }
}

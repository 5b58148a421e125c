use crate::geometry_utils::{distance_points, DepthPoint};

/// Thins out an ordered, closed outline: runs of points within
/// `merge_distance` of each other collapse into the first of the run.
pub struct PointFilter {
    merge_distance: f32,
}

impl PointFilter {
    pub fn new(merge_distance: f32) -> Self {
        PointFilter { merge_distance }
    }

    pub fn filter(&self, points: &[DepthPoint]) -> Vec<DepthPoint> {
        let mut result = Vec::new();

        let Some(first) = points.first() else {
            return result;
        };
        let mut representative = *first;
        result.push(representative);

        for p in points.iter().skip(1) {
            if !self.points_are_close(p, &representative) {
                representative = *p;
                result.push(representative);
            }
        }

        // The outline is closed; don't keep both ends of the seam
        if result.len() > 1 && self.points_are_close(&result[result.len() - 1], &result[0]) {
            result.pop();
        }

        result
    }

    fn points_are_close(&self, a: &DepthPoint, b: &DepthPoint) -> bool {
        distance_points(a, b) < self.merge_distance
    }
}

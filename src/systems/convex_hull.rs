//! Graham scan over depth points.
//!
//! Orientation is taken in the numeric x/y frame ("counter-clockwise" with
//! y increasing upwards); on an image, where y grows downwards, the same
//! ordering reads clockwise.

use std::cmp::Ordering;

use crate::geometry_utils::{cross, DepthPoint};

/// Convex hull of the given points, counter-clockwise from the pivot (lowest
/// y, then lowest x) and closed by repeating the pivot at the end.
///
/// Three or fewer points are returned as they are.
pub fn convex_hull(points: &[DepthPoint]) -> Vec<DepthPoint> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let mut hull = sort_by_angle(points);
    let mut index = 1;

    while index + 1 < hull.len() {
        let value = cross(&hull[index - 1], &hull[index + 1], &hull[index]);
        if value < 0. {
            // left turn
            index += 1;
        } else {
            hull.remove(index);
            if index > 1 {
                index -= 1;
            }
        }
    }

    hull.push(hull[0]);
    hull
}

fn pivot_index(points: &[DepthPoint]) -> usize {
    let mut min_index = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let min = &points[min_index];
        if p.y < min.y || (p.y == min.y && p.x < min.x) {
            min_index = i;
        }
    }
    min_index
}

/// Pivot first, then the other points by polar angle around it. Points at
/// the same angle are ordered nearest first, so the result does not depend
/// on input order.
fn sort_by_angle(points: &[DepthPoint]) -> Vec<DepthPoint> {
    let mut sorted = points.to_vec();
    let pivot = sorted.remove(pivot_index(points));

    sorted.sort_by(|a, b| compare_angle(&pivot, a, b));
    sorted.insert(0, pivot);
    sorted
}

fn compare_angle(pivot: &DepthPoint, a: &DepthPoint, b: &DepthPoint) -> Ordering {
    let a_on_pivot = a.x == pivot.x && a.y == pivot.y;
    let b_on_pivot = b.x == pivot.x && b.y == pivot.y;
    match (a_on_pivot, b_on_pivot) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let value = cross(pivot, a, b);
    if value > 0. {
        Ordering::Less
    } else if value < 0. {
        Ordering::Greater
    } else {
        squared_distance(pivot, a).total_cmp(&squared_distance(pivot, b))
    }
}

fn squared_distance(a: &DepthPoint, b: &DepthPoint) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    dx * dx + dy * dy
}

use crate::geometry_utils::DepthPoint;

use super::depth_masking::DepthMask;

/// Collect the boundary pixels of a mask: set pixels with at least one unset
/// neighbour (up, down, left or right). Pixels beyond the frame edges count
/// as unset. Points come out in row-major order.
pub fn find_contour(mask: &DepthMask, depth_data: &[u16]) -> Vec<DepthPoint> {
    let mut contour = Vec::new();

    let Some(bounds) = mask.bounds() else {
        return contour;
    };
    let width = mask.width();

    for y in bounds.y_min..=bounds.y_max {
        for x in bounds.x_min..=bounds.x_max {
            if !mask.is_set(x, y) {
                continue;
            }

            let top = y > 0 && mask.is_set(x, y - 1);
            let bottom = mask.is_set(x, y + 1);
            let left = x > 0 && mask.is_set(x - 1, y);
            let right = mask.is_set(x + 1, y);

            if !(top && bottom && left && right) {
                contour.push(DepthPoint::from_pixel(x, y, depth_data[y * width + x]));
            }
        }
    }

    contour
}

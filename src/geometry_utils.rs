use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in depth-pixel coordinates, together with the raw depth sample
/// (z, in mm) found at that pixel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct DepthPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl DepthPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        DepthPoint { x, y, z }
    }

    pub fn from_pixel(x: usize, y: usize, depth: u16) -> Self {
        DepthPoint {
            x: x as f32,
            y: y as f32,
            z: depth as f32,
        }
    }

    /// Raw depth sample, as handed back to the coordinate mapper
    pub fn depth(&self) -> u16 {
        self.z as u16
    }
}

pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    ((x2 - x1).powf(2.0) + (y2 - y1).powf(2.0)).sqrt()
}

/// Full 3D distance, including the depth component
pub fn distance_points(a: &DepthPoint, b: &DepthPoint) -> f32 {
    f32::sqrt(f32::powi(a.x - b.x, 2) + f32::powi(a.y - b.y, 2) + f32::powi(a.z - b.z, 2))
}

/// Z component of (a - origin) x (b - origin), using x/y only.
///
/// Positive when `b` lies counter-clockwise of `a` as seen from `origin`
/// (in the numeric x/y frame, i.e. with y increasing "up").
pub fn cross(origin: &DepthPoint, a: &DepthPoint, b: &DepthPoint) -> f32 {
    (a.x - origin.x) * (b.y - origin.y) - (b.x - origin.x) * (a.y - origin.y)
}

/// Signed angle (in degrees, range (-180, 180]) swept from the line
/// centre -> start to the line centre -> end.
pub fn angle_between(
    (centre_x, centre_y): (f32, f32),
    (start_x, start_y): (f32, f32),
    (end_x, end_y): (f32, f32),
) -> f32 {
    let first = Vector2::new(start_x - centre_x, start_y - centre_y);
    let second = Vector2::new(end_x - centre_x, end_y - centre_y);

    first.perp(&second).atan2(first.dot(&second)).to_degrees()
}

/// Angle of the forearm: from the wrist's "straight up" (towards the top
/// row of the frame) to the palm
pub fn forearm_angle(wrist: (f32, f32), palm: (f32, f32)) -> f32 {
    let (wrist_x, _) = wrist;
    angle_between(wrist, (wrist_x, 0.), palm)
}

use serde::{Deserialize, Serialize};

use crate::tracking::{CameraPoint, ColorSpacePoint, DepthSpacePoint};

/// Conversions between the sensor's coordinate spaces. Implementations are
/// expected to be pure per-point transforms; every method must produce a
/// value (possibly degenerate) for any input.
pub trait CoordinateMapper {
    /// Project a camera-space joint onto the depth frame. Untrackable
    /// positions come back with infinite coordinates.
    fn camera_to_depth(&self, point: &CameraPoint) -> DepthSpacePoint;

    /// Un-project a depth pixel with its raw depth sample (mm)
    fn depth_to_camera(&self, point: &DepthSpacePoint, depth: u16) -> CameraPoint;

    fn depth_to_color(&self, point: &DepthSpacePoint, depth: u16) -> ColorSpacePoint;
}

/// Focal lengths and principal point of one camera, in pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Intrinsics {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
}

impl Intrinsics {
    fn project(&self, point: &CameraPoint) -> (f32, f32) {
        if point.z <= 0. {
            return (f32::NEG_INFINITY, f32::NEG_INFINITY);
        }
        (
            point.x * self.fx / point.z + self.cx,
            self.cy - point.y * self.fy / point.z,
        )
    }
}

/// Ideal pinhole model for a depth camera and a colour camera sharing the
/// same optical centre. Good enough to replay recordings without the
/// factory calibration of a real sensor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PinholeMapper {
    pub depth: Intrinsics,
    pub color: Intrinsics,
}

impl Default for PinholeMapper {
    /// Nominal Kinect v2 values (512x424 depth, 1920x1080 colour)
    fn default() -> Self {
        PinholeMapper {
            depth: Intrinsics {
                fx: 365.5,
                fy: 365.5,
                cx: 256.,
                cy: 212.,
            },
            color: Intrinsics {
                fx: 1081.4,
                fy: 1081.4,
                cx: 960.,
                cy: 540.,
            },
        }
    }
}

impl CoordinateMapper for PinholeMapper {
    fn camera_to_depth(&self, point: &CameraPoint) -> DepthSpacePoint {
        let (x, y) = self.depth.project(point);
        DepthSpacePoint { x, y }
    }

    fn depth_to_camera(&self, point: &DepthSpacePoint, depth: u16) -> CameraPoint {
        let z = depth as f32 / 1000.; // mm to m
        CameraPoint {
            x: (point.x - self.depth.cx) * z / self.depth.fx,
            y: (self.depth.cy - point.y) * z / self.depth.fy,
            z,
        }
    }

    fn depth_to_color(&self, point: &DepthSpacePoint, depth: u16) -> ColorSpacePoint {
        let (x, y) = self.color.project(&self.depth_to_camera(point, depth));
        ColorSpacePoint { x, y }
    }
}

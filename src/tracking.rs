use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A position in camera space, in metres (sensor at the origin, z pointing
/// away from the sensor, y up)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A (possibly fractional) position on the depth frame's pixel grid. The
/// sensor reports untrackable positions as infinite coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct DepthSpacePoint {
    pub x: f32,
    pub y: f32,
}

impl DepthSpacePoint {
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A position on the colour image's pixel grid
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorSpacePoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    HandLeft,
    WristLeft,
    HandTipLeft,
    ThumbLeft,
    HandRight,
    WristRight,
    HandTipRight,
    ThumbRight,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandState {
    #[default]
    Unknown,
    NotTracked,
    Open,
    Closed,
    Lasso,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

/// The joints needed to locate one hand
pub struct HandJointTypes {
    pub hand: JointType,
    pub wrist: JointType,
    pub tip: JointType,
    pub thumb: JointType,
}

impl HandSide {
    pub fn joint_types(&self) -> HandJointTypes {
        match self {
            HandSide::Left => HandJointTypes {
                hand: JointType::HandLeft,
                wrist: JointType::WristLeft,
                tip: JointType::HandTipLeft,
                thumb: JointType::ThumbLeft,
            },
            HandSide::Right => HandJointTypes {
                hand: JointType::HandRight,
                wrist: JointType::WristRight,
                tip: JointType::HandTipRight,
                thumb: JointType::ThumbRight,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
/// One tracked skeleton, as provided by the body tracking source
pub struct Body {
    pub tracking_id: u64,
    #[serde(default = "default_is_tracked")]
    pub is_tracked: bool,
    pub joints: IndexMap<JointType, CameraPoint>,
    #[serde(default)]
    pub hand_left_state: HandState,
    #[serde(default)]
    pub hand_right_state: HandState,
}

fn default_is_tracked() -> bool {
    true
}

impl Body {
    pub fn new(tracking_id: u64) -> Self {
        Body {
            tracking_id,
            is_tracked: true,
            joints: IndexMap::new(),
            hand_left_state: HandState::Unknown,
            hand_right_state: HandState::Unknown,
        }
    }

    pub fn joint(&self, joint_type: JointType) -> Option<&CameraPoint> {
        self.joints.get(&joint_type)
    }

    pub fn hand_state(&self, side: HandSide) -> HandState {
        match side {
            HandSide::Left => self.hand_left_state,
            HandSide::Right => self.hand_right_state,
        }
    }
}

/// All bodies seen in one frame
pub type BodyFrame = Vec<Body>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finger {
    pub depth_point: DepthSpacePoint,
    pub camera_point: CameraPoint,
    pub color_point: ColorSpacePoint,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    pub tracking_id: u64,
    pub state: HandState,
    pub fingers: Vec<Finger>,
    pub contour_depth: Vec<DepthSpacePoint>,
    pub contour_camera: Vec<CameraPoint>,
    pub contour_color: Vec<ColorSpacePoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
/// The hands detected for a single body in a single frame
pub struct HandPair {
    pub tracking_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_left: Option<Hand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_right: Option<Hand>,
}

impl HandPair {
    pub fn hand(&self, side: HandSide) -> Option<&Hand> {
        match side {
            HandSide::Left => self.hand_left.as_ref(),
            HandSide::Right => self.hand_right.as_ref(),
        }
    }
}

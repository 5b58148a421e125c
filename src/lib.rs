pub mod coordinate_mapping;
pub mod detector_config;
pub mod geometry_utils;
pub mod hands_controller;
pub mod systems;
pub mod tracking;

pub use geometry_utils::DepthPoint;
pub use hands_controller::HandsController;

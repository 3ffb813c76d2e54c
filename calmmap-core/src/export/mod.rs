//! Presentation formats for resolved requests and route graphs

pub mod dot;
pub mod features;

pub use dot::route_graph_dot;
pub use features::{COLOR_GROUPS, color_group, resolution_feature, resolutions_to_geojson};

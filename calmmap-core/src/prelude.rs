pub use crate::DEFAULT_ENDPOINT_TOLERANCE;
pub use crate::Error;

// Re-export key components
pub use crate::discovery::{
    NoOverrides, OverrideDirectory, OverrideSource, RequestHandler, Resolution, Stage,
    resolve_all,
};
pub use crate::export::{resolutions_to_geojson, route_graph_dot};
pub use crate::loading::{DistanceMetric, NetworkBuilder, NetworkConfig, load_network};
pub use crate::model::{Direction, Request, Segment, SegmentNetwork};
pub use crate::store::{SegmentFilter, SegmentStore};

// Identifiers
pub use crate::Rank;
pub use crate::RouteId;
pub use crate::SegmentId;

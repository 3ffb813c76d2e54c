//! This module is responsible for loading centreline segments and requests
//! and building the linked segment network.

mod adjacency;
mod builder;
mod config;
pub mod centrelines;
pub mod requests;

pub use adjacency::build_route_links;
pub use builder::{NetworkBuilder, load_network};
pub use config::{DistanceMetric, NetworkConfig};
pub use centrelines::{parse_segments_geojson, read_segments_geojson};
pub use requests::{parse_requests_tsv, read_requests_tsv};

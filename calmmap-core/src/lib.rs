//! Resolution of ranked street-work requests to ordered centreline segments.
//!
//! Segments are loaded and linked per route by [`loading`], and requests go
//! through start, end and route discovery in [`discovery`] against any
//! [`store::SegmentStore`].

pub mod discovery;
pub mod error;
pub mod export;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod store;

pub use error::Error;
pub use model::{Direction, Request, Segment, SegmentNetwork};

/// Identifier of a centreline segment
pub type SegmentId = u64;
/// Identifier of the route (street) a segment belongs to
pub type RouteId = u64;
/// Position of a request in the ranked list
pub type Rank = u32;

/// Endpoints closer than this many metres are treated as the same point
pub const DEFAULT_ENDPOINT_TOLERANCE: f64 = 1.0;

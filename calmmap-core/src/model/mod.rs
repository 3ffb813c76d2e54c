//! Data model for street work request resolution
//!
//! Contains segments, requests and the in-memory network that holds them.

pub mod names;
pub mod network;
pub mod request;
pub mod segment;

pub use names::{normalize_name, same_name};
pub use network::{RouteLinks, SegmentNetwork};
pub use request::Request;
pub use segment::{Direction, Segment};

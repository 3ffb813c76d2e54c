//! Resolution of requests into start segments, end segments and a route.
//!
//! Each request goes through three stages in order. A stage that fails or
//! finds nothing stops the request, and any stage can be replaced by an
//! override for a specific request rank.

mod overrides;
mod pipeline;
mod stages;

pub use overrides::{NoOverrides, OverrideDirectory, OverrideSource, Stage};
pub use pipeline::{RequestAttempt, RequestHandler, Resolution, resolve_all};
pub use stages::{discover_end, discover_route, discover_start};

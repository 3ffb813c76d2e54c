//! In-memory segment network: an id-ordered arena of segments plus the
//! adjacency links of every route.

use hashbrown::HashMap;

use super::{Request, Segment};
use crate::{RouteId, SegmentId};

/// Directed links of one route: segment id to the ids a path may continue
/// into, in segment-id order.
pub type RouteLinks = HashMap<SegmentId, Vec<SegmentId>>;

/// Loaded segments, their routes and adjacency, and the requests to resolve.
///
/// Built once by [`NetworkBuilder`](crate::loading::NetworkBuilder) and
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SegmentNetwork {
    /// All segments, sorted by id
    segments: Vec<Segment>,
    /// Segment id to position in `segments`
    index: HashMap<SegmentId, usize>,
    /// Member segment ids of each route, sorted
    routes: HashMap<RouteId, Vec<SegmentId>>,
    links: HashMap<RouteId, RouteLinks>,
    /// Requests in rank order
    requests: Vec<Request>,
}

impl SegmentNetwork {
    /// Assembles a network from parts validated by the builder: `segments`
    /// sorted by unique id, `links` keyed by routes present in `segments`.
    pub(crate) fn from_parts(
        segments: Vec<Segment>,
        links: HashMap<RouteId, RouteLinks>,
        mut requests: Vec<Request>,
    ) -> Self {
        let index = segments
            .iter()
            .enumerate()
            .map(|(idx, seg)| (seg.id, idx))
            .collect();

        let mut routes: HashMap<RouteId, Vec<SegmentId>> = HashMap::new();
        for seg in &segments {
            routes.entry(seg.route_id).or_default().push(seg.id);
        }

        requests.sort_by_key(|req| req.rank);

        Self {
            segments,
            index,
            routes,
            links,
            requests,
        }
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.index.get(&id).map(|&idx| &self.segments[idx])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Member ids of a route, or an empty slice for an unknown route
    pub fn route_members(&self, route_id: RouteId) -> &[SegmentId] {
        self.routes.get(&route_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Adjacency of a route, if it has any links
    pub fn links(&self, route_id: RouteId) -> Option<&RouteLinks> {
        self.links.get(&route_id)
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links
            .values()
            .flat_map(|links| links.values())
            .map(Vec::len)
            .sum()
    }
}

//! Query contract the discovery pipeline runs against, and its in-memory
//! implementation over [`SegmentNetwork`].

use hashbrown::{HashMap, HashSet};

use crate::model::{RouteLinks, Segment, SegmentNetwork, normalize_name};
use crate::routing::bfs;
use crate::{Error, Request, RouteId, SegmentId};

/// Segment lookup criteria.
///
/// Dimensions are combined with AND, values within a dimension with OR. An
/// empty dimension places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentFilter {
    pub ids: Vec<SegmentId>,
    /// Full street names, matched after normalisation
    pub full_names: Vec<String>,
    pub route_ids: Vec<RouteId>,
    /// Cross street names matched against either end of a segment
    pub end_streets: Vec<String>,
}

impl SegmentFilter {
    #[must_use]
    pub fn ids(mut self, ids: impl IntoIterator<Item = SegmentId>) -> Self {
        self.ids.extend(ids);
        self
    }

    #[must_use]
    pub fn full_name(mut self, name: impl Into<String>) -> Self {
        self.full_names.push(name.into());
        self
    }

    #[must_use]
    pub fn route(mut self, route_id: RouteId) -> Self {
        self.route_ids.push(route_id);
        self
    }

    #[must_use]
    pub fn end_street(mut self, name: impl Into<String>) -> Self {
        self.end_streets.push(name.into());
        self
    }
}

/// Read access to segments, route adjacency and requests.
pub trait SegmentStore {
    /// All requests, in rank order
    fn requests(&self) -> Result<Vec<Request>, Error>;

    /// Segments matching `filter`, in id order
    fn filter_segments(&self, filter: &SegmentFilter) -> Result<Vec<Segment>, Error>;

    /// Directed links of one route. Segments without outgoing links are absent.
    fn route_links(&self, route_id: RouteId) -> Result<RouteLinks, Error>;

    /// Finds a path from the first of `from` to any of `to` within the route
    /// of the first `from` segment.
    ///
    /// Only the first `from` segment seeds the search. The path is the one
    /// with the fewest links, ties broken by link order.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCandidates`] if either slice is empty
    /// - [`Error::SegmentNotInRoute`] if a `to` segment is outside the route
    /// - [`Error::NoPath`] if no `to` segment is reachable
    fn find_path(&self, from: &[Segment], to: &[Segment]) -> Result<Vec<Segment>, Error> {
        let (Some(seed), false) = (from.first(), to.is_empty()) else {
            return Err(Error::EmptyCandidates);
        };
        let route = seed.route_id;

        let members: HashSet<SegmentId> = self
            .filter_segments(&SegmentFilter::default().route(route))?
            .iter()
            .map(|seg| seg.id)
            .chain([seed.id])
            .collect();

        for seg in to {
            if !members.contains(&seg.id) {
                return Err(Error::SegmentNotInRoute {
                    segment: seg.id,
                    route,
                });
            }
        }

        let links = self.route_links(route)?;
        let targets: HashSet<SegmentId> = to.iter().map(|seg| seg.id).collect();
        let path = bfs::shortest_simple_path(&links, seed.id, &targets).ok_or(Error::NoPath)?;

        let mut by_id: HashMap<SegmentId, Segment> = self
            .filter_segments(&SegmentFilter::default().ids(path.iter().copied()))?
            .into_iter()
            .map(|seg| (seg.id, seg))
            .collect();

        path.iter()
            .map(|id| {
                by_id.remove(id).ok_or_else(|| {
                    Error::InvalidData(format!("Linked segment {id} missing from store"))
                })
            })
            .collect()
    }
}

impl SegmentStore for SegmentNetwork {
    fn requests(&self) -> Result<Vec<Request>, Error> {
        Ok(SegmentNetwork::requests(self).to_vec())
    }

    fn filter_segments(&self, filter: &SegmentFilter) -> Result<Vec<Segment>, Error> {
        let ids: HashSet<SegmentId> = filter.ids.iter().copied().collect();
        let routes: HashSet<RouteId> = filter.route_ids.iter().copied().collect();
        let names: HashSet<String> = filter.full_names.iter().map(|n| normalize_name(n)).collect();
        let ends: HashSet<String> = filter
            .end_streets
            .iter()
            .map(|n| normalize_name(n))
            .collect();

        // Explicit ids are looked up directly instead of scanning
        let candidates: Vec<&Segment> = if ids.is_empty() {
            self.segments().iter().collect()
        } else {
            let mut found: Vec<&Segment> = ids.iter().filter_map(|id| self.segment(*id)).collect();
            found.sort_by_key(|seg| seg.id);
            found
        };

        let matched = candidates
            .into_iter()
            .filter(|seg| routes.is_empty() || routes.contains(&seg.route_id))
            .filter(|seg| names.is_empty() || names.contains(&normalize_name(&seg.name)))
            .filter(|seg| {
                ends.is_empty()
                    || ends.contains(&normalize_name(&seg.from))
                    || ends.contains(&normalize_name(&seg.to))
            })
            .cloned()
            .collect();

        Ok(matched)
    }

    fn route_links(&self, route_id: RouteId) -> Result<RouteLinks, Error> {
        Ok(self.links(route_id).cloned().unwrap_or_default())
    }
}

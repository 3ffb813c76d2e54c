//! The three discovery stages: start segments, end segments, route.

use std::slice;

use hashbrown::HashSet;
use itertools::Itertools;
use log::debug;

use crate::model::{Request, Segment, normalize_name, same_name};
use crate::store::{SegmentFilter, SegmentStore};
use crate::{Error, RouteId, SegmentId};

/// Segments of the requested street that touch the `from` cross street, or
/// the whole street when no `from` is given.
///
/// # Errors
///
/// Returns [`Error::AmbiguousRoute`] if the matches belong to more than one
/// route: the later stages assume a single route.
pub fn discover_start<S>(store: &S, req: &Request) -> Result<Vec<Segment>, Error>
where
    S: SegmentStore + ?Sized,
{
    let mut filter = SegmentFilter::default().full_name(normalize_name(&req.street_name));
    if !req.from.is_empty() {
        filter = filter.end_street(normalize_name(&req.from));
    }

    let segments = store.filter_segments(&filter)?;

    let routes: Vec<RouteId> = segments.iter().map(|seg| seg.route_id).unique().collect();
    if routes.len() > 1 {
        return Err(Error::AmbiguousRoute {
            routes: routes.len(),
        });
    }

    debug!("Request {}: {} start segments", req.rank, segments.len());
    Ok(segments)
}

/// Segments on the start route that touch the `to` cross street, or every
/// segment of the route when no `to` is given. May be empty.
pub fn discover_end<S>(store: &S, req: &Request, start: &[Segment]) -> Result<Vec<Segment>, Error>
where
    S: SegmentStore + ?Sized,
{
    let first = start.first().ok_or(Error::NoStartSegments)?;

    let mut filter = SegmentFilter::default().route(first.route_id);
    if !req.to.is_empty() {
        filter = filter.end_street(normalize_name(&req.to));
    }

    let segments = store.filter_segments(&filter)?;
    debug!("Request {}: {} end segments", req.rank, segments.len());
    Ok(segments)
}

/// Ordered segments from a start segment to an end segment.
///
/// - No `from` and no `to`: the whole route.
/// - With `from`: leading segments are dropped while the next one is also
///   a start candidate, so the path begins with a single start segment.
/// - No `to`, or `to` naming the same street as `from`: the longest path
///   from the head of the found path to any end candidate wins.
pub fn discover_route<S>(
    store: &S,
    req: &Request,
    start: &[Segment],
    end: &[Segment],
) -> Result<Vec<Segment>, Error>
where
    S: SegmentStore + ?Sized,
{
    let first = start.first().ok_or(Error::NoStartSegments)?;
    if end.is_empty() {
        return Err(Error::NoEndSegments);
    }

    if req.is_whole_street() {
        return store.filter_segments(&SegmentFilter::default().route(first.route_id));
    }

    let mut route = store.find_path(start, end)?;

    if !req.from.is_empty() {
        let start_ids: HashSet<SegmentId> = start.iter().map(|seg| seg.id).collect();
        let mut skip = 0;
        while route.len() - skip > 2 && start_ids.contains(&route[skip + 1].id) {
            skip += 1;
        }
        route.drain(..skip);
    }

    // "from X to the end" and "from X to X"
    if req.to.is_empty() || same_name(&req.to, &req.from) {
        route = longest_path(store, route, end)?;
    }

    debug!("Request {}: route of {} segments", req.rank, route.len());
    Ok(route)
}

/// Searches a path from the head of `found` to every end candidate and keeps
/// the one with the most segments. Earlier candidates win ties, and `found`
/// itself is the baseline.
fn longest_path<S>(store: &S, found: Vec<Segment>, end: &[Segment]) -> Result<Vec<Segment>, Error>
where
    S: SegmentStore + ?Sized,
{
    let Some(head) = found.first().cloned() else {
        return Ok(found);
    };

    let mut best = found;
    for candidate in end {
        match store.find_path(slice::from_ref(&head), slice::from_ref(candidate)) {
            Ok(path) if path.len() > best.len() => best = path,
            Ok(_) => {}
            Err(Error::NoPath) => {
                debug!("No path from {} to end candidate {}", head.id, candidate.id);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(best)
}

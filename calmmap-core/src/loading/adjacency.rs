//! Derivation of directed links between the segments of one route

use crate::model::{Direction, RouteLinks, Segment};
use crate::{Error, SegmentId};

use super::config::NetworkConfig;

/// Computes the links among `segments`, which must all share one route.
///
/// For each segment, its successors are listed in the order `segments` is
/// given. Segments without successors get no entry.
///
/// # Errors
///
/// Returns [`Error::IncompatibleDirections`] if two segments of the route
/// carry a direction pairing the source data never uses.
pub fn build_route_links(segments: &[Segment], config: &NetworkConfig) -> Result<RouteLinks, Error> {
    let mut links = RouteLinks::new();

    for cur in segments {
        let next_ids = successors(cur, segments, config)?;
        if !next_ids.is_empty() {
            links.insert(cur.id, next_ids);
        }
    }

    Ok(links)
}

fn successors(
    cur: &Segment,
    segments: &[Segment],
    config: &NetworkConfig,
) -> Result<Vec<SegmentId>, Error> {
    let mut out = Vec::new();
    for next in segments {
        if cur.id == next.id {
            continue;
        }
        if connects(cur, next, config)? {
            out.push(next.id);
        }
    }
    Ok(out)
}

/// Whether travel may continue from `cur` into `next`.
///
/// The endpoint pairs compared depend on both directions: a one-way segment
/// can only be left through its last point and entered through its first.
fn connects(cur: &Segment, next: &Segment, config: &NetworkConfig) -> Result<bool, Error> {
    let close = |a, b| config.is_close(a, b);
    let (cf, cl) = (cur.first_point(), cur.last_point());
    let (nf, nl) = (next.first_point(), next.last_point());

    let linked = match (cur.direction, next.direction) {
        (Direction::Both, Direction::Both) => {
            close(cf, nf) || close(cf, nl) || close(cl, nf) || close(cl, nl)
        }
        (Direction::Both, Direction::FirstToLast) => close(nf, cf) || close(nf, cl),
        (Direction::FirstToLast, Direction::FirstToLast) => close(nf, cl),
        (Direction::FirstToLast, Direction::Both) => close(cl, nf) || close(cl, nl),
        (Direction::Both, Direction::LastToFirst) | (Direction::LastToFirst, Direction::Both) => {
            false
        }
        (current_direction, next_direction) => {
            return Err(Error::IncompatibleDirections {
                current: cur.to_string(),
                next: next.to_string(),
                current_direction: current_direction.code(),
                next_direction: next_direction.code(),
            });
        }
    };

    Ok(linked)
}

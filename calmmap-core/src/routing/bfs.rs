//! Breadth-first search over partial paths.
//!
//! Each queue entry is a whole candidate path so that loop prevention only
//! rejects nodes already on that path, not nodes seen on other branches.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::SegmentId;
use crate::model::RouteLinks;

/// Returns the first simple path from `start` to any of `targets`, in BFS
/// order. `start` alone is a valid path when it is itself a target.
pub fn shortest_simple_path(
    links: &RouteLinks,
    start: SegmentId,
    targets: &HashSet<SegmentId>,
) -> Option<Vec<SegmentId>> {
    let mut queue = VecDeque::from([vec![start]]);

    while let Some(path) = queue.pop_front() {
        let last = *path.last()?;
        if targets.contains(&last) {
            log::trace!("Found path of {} segments ending at {last}", path.len());
            return Some(path);
        }

        let next_ids = links.get(&last).map(Vec::as_slice).unwrap_or_default();
        for &next in next_ids {
            // Loop prevention
            if path.contains(&next) {
                continue;
            }
            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.extend_from_slice(&path);
            extended.push(next);
            queue.push_back(extended);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(edges: &[(SegmentId, SegmentId)]) -> RouteLinks {
        let mut links = RouteLinks::new();
        for &(from, to) in edges {
            links.entry(from).or_default().push(to);
        }
        links
    }

    fn targets(ids: &[SegmentId]) -> HashSet<SegmentId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn start_that_is_a_target() {
        let graph = links(&[(1, 2)]);
        assert_eq!(shortest_simple_path(&graph, 1, &targets(&[1, 2])), Some(vec![1]));
    }

    #[test]
    fn fewest_links_wins() {
        // 1 -> 2 -> 3 -> 4 and the shortcut 1 -> 5 -> 4
        let graph = links(&[(1, 2), (2, 3), (3, 4), (1, 5), (5, 4)]);
        assert_eq!(
            shortest_simple_path(&graph, 1, &targets(&[4])),
            Some(vec![1, 5, 4])
        );
    }

    #[test]
    fn nearest_of_several_targets() {
        let graph = links(&[(1, 2), (2, 3), (3, 4)]);
        assert_eq!(
            shortest_simple_path(&graph, 1, &targets(&[4, 3])),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn cycles_terminate() {
        let graph = links(&[(1, 2), (2, 1), (2, 3), (3, 2)]);
        assert_eq!(shortest_simple_path(&graph, 1, &targets(&[9])), None);
    }

    #[test]
    fn respects_edge_direction() {
        let graph = links(&[(2, 1)]);
        assert_eq!(shortest_simple_path(&graph, 1, &targets(&[2])), None);
    }
}

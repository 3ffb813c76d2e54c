//! Graphviz rendering of one route's adjacency

use hashbrown::HashMap;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::store::{SegmentFilter, SegmentStore};
use crate::{Error, RouteId, SegmentId};

/// Renders a route as a DOT digraph labelled with the street name, one node
/// per segment ("<from> to <to>") and one edge per link.
///
/// # Errors
///
/// Returns [`Error::UnknownRoute`] if no segment belongs to `route_id`.
pub fn route_graph_dot<S>(store: &S, route_id: RouteId) -> Result<String, Error>
where
    S: SegmentStore + ?Sized,
{
    let segments = store.filter_segments(&SegmentFilter::default().route(route_id))?;
    let Some(first) = segments.first() else {
        return Err(Error::UnknownRoute(route_id));
    };
    let links = store.route_links(route_id)?;

    // Edge weights must be displayable for `Dot`, even unlabelled
    let mut graph: DiGraph<String, &str> = DiGraph::new();
    let nodes: HashMap<SegmentId, NodeIndex> = segments
        .iter()
        .map(|seg| (seg.id, graph.add_node(format!("{} to {}", seg.from, seg.to))))
        .collect();

    for seg in &segments {
        let Some(next_ids) = links.get(&seg.id) else {
            continue;
        };
        for next in next_ids {
            if let Some(&target) = nodes.get(next) {
                graph.add_edge(nodes[&seg.id], target, "");
            }
        }
    }

    let content = Dot::with_config(&graph, &[Config::EdgeNoLabel, Config::GraphContentOnly]);
    Ok(format!(
        "digraph {{\n    label = {:?}\n{content}}}\n",
        first.name
    ))
}

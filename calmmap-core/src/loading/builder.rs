use std::path::Path;

use hashbrown::HashMap;
use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use super::adjacency::build_route_links;
use super::config::NetworkConfig;
use super::centrelines::read_segments_geojson;
use super::requests::read_requests_tsv;
use crate::model::{Request, RouteLinks, Segment, SegmentNetwork};
use crate::{Error, RouteId};

/// Collects segments and requests and turns them into a [`SegmentNetwork`].
///
/// Nothing is visible until [`build`](Self::build) succeeds, so a failed
/// load never leaves a partially linked network behind.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    config: NetworkConfig,
    segments: Vec<Segment>,
    requests: Vec<Request>,
}

impl NetworkBuilder {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_segments(mut self, segments: impl IntoIterator<Item = Segment>) -> Self {
        self.segments.extend(segments);
        self
    }

    #[must_use]
    pub fn with_requests(mut self, requests: impl IntoIterator<Item = Request>) -> Self {
        self.requests.extend(requests);
        self
    }

    /// Validates the segments and derives the links of every route.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a segment id is
    /// repeated, or a route contains an unsupported direction pairing.
    pub fn build(self) -> Result<SegmentNetwork, Error> {
        validate_config(&self.config)?;

        let mut segments = self.segments;
        segments.sort_by_key(|seg| seg.id);
        if let Some((dup, _)) = segments.iter().tuple_windows().find(|(a, b)| a.id == b.id) {
            return Err(Error::DuplicateSegment(dup.id));
        }

        let routes = segments
            .iter()
            .cloned()
            .into_group_map_by(|seg| seg.route_id);

        info!(
            "Linking {} segments across {} routes",
            segments.len(),
            routes.len()
        );

        let config = self.config;
        let links: HashMap<RouteId, RouteLinks> = routes
            .into_par_iter()
            .map(|(route_id, mut members)| {
                members.sort_by_key(|seg| seg.id);
                build_route_links(&members, &config).map(|links| (route_id, links))
            })
            .collect::<Result<Vec<(RouteId, RouteLinks)>, Error>>()?
            .into_iter()
            .filter(|(_, links)| !links.is_empty())
            .collect();

        let network = SegmentNetwork::from_parts(segments, links, self.requests);
        info!(
            "Segment network built: {} segments, {} routes, {} links, {} requests",
            network.segment_count(),
            network.route_count(),
            network.link_count(),
            network.requests().len()
        );
        Ok(network)
    }
}

/// Reads centreline segments (and optionally requests) from disk and builds
/// the network.
///
/// # Errors
///
/// Returns an error if a file is missing or malformed, or if the build fails.
pub fn load_network(
    segments_path: &Path,
    requests_path: Option<&Path>,
    config: NetworkConfig,
) -> Result<SegmentNetwork, Error> {
    info!("Reading centreline segments: {}", segments_path.display());
    let segments = read_segments_geojson(segments_path)?;

    let requests = match requests_path {
        Some(path) => {
            info!("Reading requests: {}", path.display());
            read_requests_tsv(path)?
        }
        None => Vec::new(),
    };

    NetworkBuilder::new(config)
        .with_segments(segments)
        .with_requests(requests)
        .build()
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Endpoint tolerance must be a positive number, got {}",
            config.tolerance
        )));
    }
    Ok(())
}

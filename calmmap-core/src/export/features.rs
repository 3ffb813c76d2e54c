use geo::MultiLineString;
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue, JsonObject};
use serde_json::json;

use crate::Rank;
use crate::discovery::Resolution;
use crate::model::Request;

/// Number of rank bands requests are coloured by
pub const COLOR_GROUPS: usize = 20;

/// Rank band of a request among `total` requests, `0..COLOR_GROUPS`
pub fn color_group(rank: Rank, total: usize) -> usize {
    let band = (total / COLOR_GROUPS).max(1);
    (rank as usize / band).min(COLOR_GROUPS - 1)
}

/// Converts one resolved request to a `GeoJSON` Feature whose geometry is
/// the route, one line per segment.
pub fn resolution_feature(req: &Request, resolution: &Resolution, color_group: usize) -> Feature {
    let lines = MultiLineString::new(
        resolution
            .route
            .iter()
            .map(|seg| seg.geometry().clone())
            .collect(),
    );
    let segment_ids: Vec<_> = resolution.route.iter().map(|seg| seg.id).collect();

    let mut properties = JsonObject::new();
    properties.insert("rank".to_string(), json!(req.rank));
    properties.insert("label".to_string(), json!(req.to_string()));
    properties.insert("street".to_string(), json!(req.street_name));
    properties.insert("from".to_string(), json!(req.from));
    properties.insert("to".to_string(), json!(req.to));
    properties.insert("district".to_string(), json!(req.district));
    properties.insert("segment_ids".to_string(), json!(segment_ids));
    properties.insert("color_group".to_string(), json!(color_group));

    Feature {
        geometry: Some(Geometry::new(GeometryValue::from(&lines))),
        properties: Some(properties),
        ..Default::default()
    }
}

/// Converts resolved requests to a `FeatureCollection`, banding colours by
/// rank over `total_requests`.
pub fn resolutions_to_geojson<'a, I>(resolved: I, total_requests: usize) -> FeatureCollection
where
    I: IntoIterator<Item = (&'a Request, &'a Resolution)>,
{
    let features = resolved
        .into_iter()
        .map(|(req, resolution)| {
            resolution_feature(req, resolution, color_group(req.rank, total_requests))
        })
        .collect();

    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

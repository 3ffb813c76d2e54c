//! Centreline segments from a `GeoJSON` `FeatureCollection`

use std::fs;
use std::path::Path;

use geo::{Coord, LineString};
use geojson::{Feature, GeoJson};
use log::warn;
use serde_json::Value as JsonValue;

use crate::model::{Direction, Segment};
use crate::{Error, RouteId, SegmentId};

/// Reads all features of a centreline `FeatureCollection` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a feature collection,
/// or a feature lacks its id, route, direction or geometry.
pub fn read_segments_geojson(path: &Path) -> Result<Vec<Segment>, Error> {
    let text = fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    parse_segments_geojson(&text)
}

/// Parses a centreline `FeatureCollection`.
///
/// Features carry the centreline attributes as properties: `FDMID`,
/// `ROUTE_ID`, `STR_DIR`, `FULL_NAME`, `FROM_STR`, `TO_STR`, `STR_NAME`,
/// `STR_TYPE` and `ST_CLASS`.
///
/// # Errors
///
/// See [`read_segments_geojson`].
pub fn parse_segments_geojson(text: &str) -> Result<Vec<Segment>, Error> {
    let GeoJson::FeatureCollection(collection) = text.parse::<GeoJson>()? else {
        return Err(Error::InvalidData(
            "Centreline file is not a FeatureCollection".to_string(),
        ));
    };

    collection.features.into_iter().map(segment_from_feature).collect()
}

fn segment_from_feature(feature: Feature) -> Result<Segment, Error> {
    let id: SegmentId = integer_property(&feature, "FDMID")?;
    let route_id: RouteId = integer_property(&feature, "ROUTE_ID")?;
    let direction: Direction = text_property(&feature, "STR_DIR").parse()?;

    let name = text_property(&feature, "FULL_NAME");
    let from = text_property(&feature, "FROM_STR");
    let to = text_property(&feature, "TO_STR");
    let street_name = text_property(&feature, "STR_NAME");
    let street_type = text_property(&feature, "STR_TYPE");
    let street_class = text_property(&feature, "ST_CLASS");

    let geometry = feature
        .geometry
        .ok_or(Error::EmptyGeometry(id))
        .and_then(|geometry| line_from_geometry(id, geometry))?;

    Ok(Segment::new(id, route_id, direction, geometry)?
        .with_name(name)
        .with_cross_streets(from, to)
        .with_classification(street_name, street_type, street_class))
}

/// Flattens the feature geometry into a single line, keeping point order.
fn line_from_geometry(id: SegmentId, geometry: geojson::Geometry) -> Result<LineString<f64>, Error> {
    match geo::Geometry::<f64>::try_from(geometry)? {
        geo::Geometry::LineString(line) => Ok(line),
        geo::Geometry::MultiLineString(lines) => {
            if lines.0.len() > 1 {
                warn!(
                    "Segment {id} has {} line parts, joining them in order",
                    lines.0.len()
                );
            }
            let coords: Vec<Coord<f64>> = lines.0.into_iter().flat_map(|line| line.0).collect();
            Ok(LineString::new(coords))
        }
        other => Err(Error::InvalidData(format!(
            "Segment {id} has unsupported geometry {other:?}"
        ))),
    }
}

fn text_property(feature: &Feature, key: &str) -> String {
    match feature.property(key) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn integer_property(feature: &Feature, key: &str) -> Result<u64, Error> {
    let value = match feature.property(key) {
        Some(JsonValue::Number(n)) => n.as_u64(),
        Some(JsonValue::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    value.ok_or_else(|| {
        Error::InvalidData(format!(
            "Feature property {key} missing or not an integer: {:?}",
            feature.property(key)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[-79.40, 43.65], [-79.39, 43.66]]},
                "properties": {
                    "FDMID": 101, "ROUTE_ID": "7", "STR_DIR": "BOTH",
                    "FULL_NAME": "TEST LN", "FROM_STR": "A ST", "TO_STR": "B ST",
                    "STR_NAME": "TEST", "STR_TYPE": "LN ", "ST_CLASS": " LOCAL"
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "MultiLineString", "coordinates": [
                    [[-79.39, 43.66], [-79.38, 43.67]],
                    [[-79.38, 43.67], [-79.37, 43.68]]
                ]},
                "properties": {"FDMID": "102", "ROUTE_ID": 7, "STR_DIR": "FOTD", "FULL_NAME": "TEST LN"}
            }
        ]
    }"#;

    #[test]
    fn parses_features() {
        let segments = parse_segments_geojson(SAMPLE).unwrap();
        assert_eq!(segments.len(), 2);

        let first = &segments[0];
        assert_eq!(first.id, 101);
        assert_eq!(first.route_id, 7);
        assert_eq!(first.direction, Direction::Both);
        assert_eq!(first.to_string(), "101 TEST LN from A ST to B ST");
        // Classification is carried through as given
        assert_eq!(first.street_type, "LN ");
        assert_eq!(first.street_class, " LOCAL");

        let second = &segments[1];
        assert_eq!(second.direction, Direction::FirstToLast);
        assert_eq!(second.geometry().0.len(), 4);
        assert_eq!(second.last_point(), geo::Point::new(-79.37, 43.68));
        assert!(second.from.is_empty());
    }

    #[test]
    fn unknown_direction_fails() {
        let text = SAMPLE.replace("\"FOTD\"", "\"SIDEWAYS\"");
        assert!(matches!(
            parse_segments_geojson(&text),
            Err(Error::UnknownDirection(_))
        ));
    }

    #[test]
    fn missing_id_fails() {
        let text = SAMPLE.replace("\"FDMID\": 101,", "");
        assert!(matches!(
            parse_segments_geojson(&text),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn rejects_non_collections() {
        let text = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(parse_segments_geojson(text).is_err());
    }
}

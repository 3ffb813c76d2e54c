use thiserror::Error;

use crate::{RouteId, SegmentId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown direction code: {0:?}")]
    UnknownDirection(String),
    #[error("Unknown direction pair: {current_direction} and {next_direction}, {current} / {next}")]
    IncompatibleDirections {
        current: String,
        next: String,
        current_direction: &'static str,
        next_direction: &'static str,
    },
    #[error("Segment {0} has no geometry")]
    EmptyGeometry(SegmentId),
    #[error("Segment {0} appears more than once")]
    DuplicateSegment(SegmentId),
    #[error("Discovered segments with {routes} different route IDs")]
    AmbiguousRoute { routes: usize },
    #[error("No start segments found")]
    NoStartSegments,
    #[error("No end segments found")]
    NoEndSegments,
    #[error("Empty from segments or empty to segments")]
    EmptyCandidates,
    #[error("Could not find path")]
    NoPath,
    #[error("To segment {segment} not found in route {route} graph")]
    SegmentNotInRoute { segment: SegmentId, route: RouteId },
    #[error("No segments found for route {0}")]
    UnknownRoute(RouteId),
    #[error("Malformed override {key}: {reason}")]
    MalformedOverride { key: String, reason: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(#[from] Box<geojson::Error>),
}

impl From<geojson::Error> for Error {
    fn from(value: geojson::Error) -> Self {
        Error::GeoJsonError(Box::new(value))
    }
}

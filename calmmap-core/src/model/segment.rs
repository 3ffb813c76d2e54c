//! Street segments and their directionality

use std::fmt;
use std::str::FromStr;

use geo::{LineString, Point};

use crate::{Error, RouteId, SegmentId};

/// Travel direction permitted along a segment's geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Two-way street
    Both,
    /// One-way, travelled from the first geometry point to the last
    FirstToLast,
    /// One-way, travelled from the last geometry point to the first
    LastToFirst,
}

impl Direction {
    /// Code used by the centreline source data
    pub fn code(self) -> &'static str {
        match self {
            Direction::Both => "BOTH",
            Direction::FirstToLast => "FOTD",
            Direction::LastToFirst => "FDTO",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOTH" => Ok(Direction::Both),
            "FOTD" => Ok(Direction::FirstToLast),
            "FDTO" => Ok(Direction::LastToFirst),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A piece of a named street between two cross streets.
///
/// The endpoints are cached from the geometry when the segment is created
/// and are what adjacency matching compares.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    /// Full street name with qualifiers, e.g. `TEST LN`
    pub name: String,
    pub from: String,
    pub to: String,
    pub route_id: RouteId,
    pub direction: Direction,
    geometry: LineString<f64>,
    first_point: Point<f64>,
    last_point: Point<f64>,
    pub street_name: String,
    pub street_type: String,
    pub street_class: String,
}

impl Segment {
    /// Creates a segment from its identity and geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGeometry`] if the line string has no points.
    pub fn new(
        id: SegmentId,
        route_id: RouteId,
        direction: Direction,
        geometry: LineString<f64>,
    ) -> Result<Self, Error> {
        let (Some(first), Some(last)) = (geometry.0.first(), geometry.0.last()) else {
            return Err(Error::EmptyGeometry(id));
        };
        if geometry.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(Error::InvalidData(format!(
                "Segment {id} has non-finite coordinates"
            )));
        }

        Ok(Self {
            id,
            name: String::new(),
            from: String::new(),
            to: String::new(),
            route_id,
            direction,
            first_point: Point::from(*first),
            last_point: Point::from(*last),
            geometry,
            street_name: String::new(),
            street_type: String::new(),
            street_class: String::new(),
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_cross_streets(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = from.into();
        self.to = to.into();
        self
    }

    #[must_use]
    pub fn with_classification(
        mut self,
        street_name: impl Into<String>,
        street_type: impl Into<String>,
        street_class: impl Into<String>,
    ) -> Self {
        self.street_name = street_name.into();
        self.street_type = street_type.into();
        self.street_class = street_class.into();
        self
    }

    pub fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }

    pub fn first_point(&self) -> Point<f64> {
        self.first_point
    }

    pub fn last_point(&self) -> Point<f64> {
        self.last_point
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} from {} to {}", self.id, self.name, self.from, self.to)
    }
}

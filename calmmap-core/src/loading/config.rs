use geo::{Distance, Euclidean, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_ENDPOINT_TOLERANCE;

/// How endpoint proximity is measured when deriving adjacency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Great-circle distance in metres, for lon/lat geometry
    #[default]
    Haversine,
    /// Planar distance in the geometry's native units
    Euclidean,
}

impl DistanceMetric {
    pub fn distance(self, a: Point<f64>, b: Point<f64>) -> f64 {
        match self {
            DistanceMetric::Haversine => Haversine.distance(a, b),
            DistanceMetric::Euclidean => Euclidean.distance(a, b),
        }
    }
}

/// Settings for building a [`SegmentNetwork`](crate::SegmentNetwork)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Endpoints closer than this are considered the same intersection
    pub tolerance: f64,
    pub metric: DistanceMetric,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_ENDPOINT_TOLERANCE,
            metric: DistanceMetric::default(),
        }
    }
}

impl NetworkConfig {
    pub(crate) fn is_close(&self, a: Point<f64>, b: Point<f64>) -> bool {
        self.metric.distance(a, b) < self.tolerance
    }
}

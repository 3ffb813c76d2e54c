//! Street work requests awaiting resolution

use std::fmt;

use crate::Rank;

/// A ranked request naming a street and, optionally, the cross streets it
/// runs between.
///
/// An empty `from` means the whole street; an empty `to` means "to the end".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    pub street_name: String,
    pub from: String,
    pub to: String,
    pub district: String,
    pub rank: Rank,
}

impl Request {
    pub fn new(rank: Rank, street_name: impl Into<String>) -> Self {
        Self {
            rank,
            street_name: street_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_street(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    #[must_use]
    pub fn to_street(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    #[must_use]
    pub fn in_district(mut self, district: impl Into<String>) -> Self {
        self.district = district.into();
        self
    }

    pub fn is_whole_street(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.rank, self.street_name)?;
        if self.is_whole_street() {
            return f.write_str("(all)");
        }
        write!(f, "from {}", self.from)?;
        if !self.to.is_empty() {
            write!(f, " to {}", self.to)?;
        }
        Ok(())
    }
}

//! Manually supplied segment lists that replace a discovery stage

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;

use hashbrown::HashMap;

use crate::{Error, Rank, SegmentId};

/// One of the three sequential discovery stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Start,
    End,
    Route,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Start, Stage::End, Stage::Route];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::End => "end",
            Stage::Route => "route",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| Error::InvalidData(format!("Unknown discovery stage: {s:?}")))
    }
}

/// Source of per-request, per-stage overrides.
///
/// `Ok(None)` means "no override, discover normally".
pub trait OverrideSource {
    fn lookup(&self, rank: Rank, stage: Stage) -> Result<Option<Vec<SegmentId>>, Error>;
}

/// Never overrides anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideSource for NoOverrides {
    fn lookup(&self, _rank: Rank, _stage: Stage) -> Result<Option<Vec<SegmentId>>, Error> {
        Ok(None)
    }
}

impl OverrideSource for HashMap<(Rank, Stage), Vec<SegmentId>> {
    fn lookup(&self, rank: Rank, stage: Stage) -> Result<Option<Vec<SegmentId>>, Error> {
        Ok(self.get(&(rank, stage)).cloned())
    }
}

/// Overrides stored as `<dir>/<rank>.<stage>` files holding one segment id
/// per line.
#[derive(Debug, Clone)]
pub struct OverrideDirectory {
    root: PathBuf,
}

impl OverrideDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, rank: Rank, stage: Stage) -> PathBuf {
        self.root.join(format!("{rank}.{stage}"))
    }
}

impl OverrideSource for OverrideDirectory {
    fn lookup(&self, rank: Rank, stage: Stage) -> Result<Option<Vec<SegmentId>>, Error> {
        let path = self.path_for(rank, stage);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let ids = parse_override_ids(&text).map_err(|reason| Error::MalformedOverride {
            key: path.display().to_string(),
            reason,
        })?;
        log::debug!("Override {} supplies {} segments", path.display(), ids.len());
        Ok(Some(ids))
    }
}

fn parse_override_ids(text: &str) -> Result<Vec<SegmentId>, String> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(lineno, line)| {
            line.parse::<SegmentId>()
                .map_err(|e| format!("line {lineno}: {line:?}: {e}"))
        })
        .collect()
}

use rayon::prelude::*;

use super::overrides::{OverrideSource, Stage};
use super::stages::{discover_end, discover_route, discover_start};
use crate::model::{Request, Segment};
use crate::store::{SegmentFilter, SegmentStore};
use crate::{Error, SegmentId};

/// Segments a request resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub start: Vec<Segment>,
    pub end: Vec<Segment>,
    /// Ordered from the start of the work to its end
    pub route: Vec<Segment>,
}

/// Outcome of every stage of one request.
///
/// A stage that could not run because an earlier one failed carries the
/// reason it was skipped.
#[derive(Debug)]
pub struct RequestAttempt {
    pub start: Result<Vec<Segment>, Error>,
    pub end: Result<Vec<Segment>, Error>,
    pub route: Result<Vec<Segment>, Error>,
}

impl RequestAttempt {
    fn stopped_at_start(start: Result<Vec<Segment>, Error>) -> Self {
        Self {
            start: start.and_then(|_| Err(Error::NoStartSegments)),
            end: Err(Error::NoStartSegments),
            route: Err(Error::NoStartSegments),
        }
    }

    /// The resolution, or the error of the first stage that failed
    pub fn into_resolution(self) -> Result<Resolution, Error> {
        Ok(Resolution {
            start: self.start?,
            end: self.end?,
            route: self.route?,
        })
    }
}

/// Runs start, end and route discovery for requests against a store,
/// letting `overrides` replace any stage.
pub struct RequestHandler<'a, S: ?Sized, O: ?Sized> {
    store: &'a S,
    overrides: &'a O,
}

impl<'a, S, O> RequestHandler<'a, S, O>
where
    S: SegmentStore + ?Sized,
    O: OverrideSource + ?Sized,
{
    pub fn new(store: &'a S, overrides: &'a O) -> Self {
        Self { store, overrides }
    }

    /// Runs the stages in order, stopping at the first that fails or finds
    /// nothing.
    pub fn attempt(&self, req: &Request) -> RequestAttempt {
        let start = self.run_stage(req, Stage::Start, || discover_start(self.store, req));
        let start = match start {
            Ok(segments) if !segments.is_empty() => segments,
            other => return RequestAttempt::stopped_at_start(other),
        };

        let end = self.run_stage(req, Stage::End, || discover_end(self.store, req, &start));
        let end = match end {
            Ok(segments) if !segments.is_empty() => segments,
            other => {
                return RequestAttempt {
                    start: Ok(start),
                    end: other.and_then(|_| Err(Error::NoEndSegments)),
                    route: Err(Error::NoEndSegments),
                };
            }
        };

        let route = self.run_stage(req, Stage::Route, || {
            discover_route(self.store, req, &start, &end)
        });

        RequestAttempt {
            start: Ok(start),
            end: Ok(end),
            route,
        }
    }

    /// Resolves one request.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that failed.
    pub fn handle(&self, req: &Request) -> Result<Resolution, Error> {
        self.attempt(req).into_resolution()
    }

    fn run_stage<F>(&self, req: &Request, stage: Stage, discover: F) -> Result<Vec<Segment>, Error>
    where
        F: FnOnce() -> Result<Vec<Segment>, Error>,
    {
        match self.overrides.lookup(req.rank, stage)? {
            Some(ids) => {
                log::debug!("Request {}: {stage} stage overridden", req.rank);
                segments_by_id(self.store, req, stage, &ids)
            }
            None => discover(),
        }
    }
}

/// Looks up override ids, keeping the order they were given in.
fn segments_by_id<S>(
    store: &S,
    req: &Request,
    stage: Stage,
    ids: &[SegmentId],
) -> Result<Vec<Segment>, Error>
where
    S: SegmentStore + ?Sized,
{
    let malformed = |reason: String| Error::MalformedOverride {
        key: format!("{}.{stage}", req.rank),
        reason,
    };

    if ids.is_empty() {
        return Err(malformed("no segment ids".to_string()));
    }

    let found = store.filter_segments(&SegmentFilter::default().ids(ids.iter().copied()))?;
    ids.iter()
        .map(|id| {
            found
                .iter()
                .find(|seg| seg.id == *id)
                .cloned()
                .ok_or_else(|| malformed(format!("unknown segment {id}")))
        })
        .collect()
}

/// Resolves every request independently and in parallel. Results are in the
/// order of `requests`.
pub fn resolve_all<S, O>(
    store: &S,
    overrides: &O,
    requests: &[Request],
) -> Vec<(Request, Result<Resolution, Error>)>
where
    S: SegmentStore + Sync + ?Sized,
    O: OverrideSource + Sync + ?Sized,
{
    let handler = RequestHandler::new(store, overrides);
    let results: Vec<_> = requests
        .par_iter()
        .map(|req| (req.clone(), handler.handle(req)))
        .collect();

    let failed = results.iter().filter(|(_, res)| res.is_err()).count();
    log::info!(
        "Resolved {} of {} requests",
        results.len() - failed,
        results.len()
    );
    results
}

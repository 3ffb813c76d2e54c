//! Subcommand implementations. Each writes its result to `out`.

use std::io::Write;

use anyhow::{Context, bail};
use calmmap_core::discovery::{OverrideSource, RequestAttempt, RequestHandler, resolve_all};
use calmmap_core::export::{resolutions_to_geojson, route_graph_dot};
use calmmap_core::{Error, Rank, Request, RouteId, Segment, SegmentId, SegmentNetwork};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct StageReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    segment_ids: Option<Vec<SegmentId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&Result<Vec<Segment>, Error>> for StageReport {
    fn from(stage: &Result<Vec<Segment>, Error>) -> Self {
        match stage {
            Ok(segments) => Self {
                segment_ids: Some(segments.iter().map(|seg| seg.id).collect()),
                error: None,
            },
            Err(e) => Self {
                segment_ids: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestReport {
    rank: Rank,
    label: String,
    district: String,
    start: StageReport,
    end: StageReport,
    route: StageReport,
}

fn selected_requests(network: &SegmentNetwork, rank: Option<Rank>) -> anyhow::Result<&[Request]> {
    let requests = network.requests();
    if requests.is_empty() {
        bail!("No requests loaded, pass --requests or set `requests` in the config");
    }
    match rank {
        None => Ok(requests),
        Some(rank) => match requests.iter().position(|req| req.rank == rank) {
            Some(i) => Ok(&requests[i..=i]),
            None => bail!("No request with rank {rank}"),
        },
    }
}

/// Review report of every stage of each request, as text or JSON.
pub fn resolve<O>(
    network: &SegmentNetwork,
    overrides: &O,
    rank: Option<Rank>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    O: OverrideSource + ?Sized,
{
    let handler = RequestHandler::new(network, overrides);
    let attempts: Vec<(&Request, RequestAttempt)> = selected_requests(network, rank)?
        .iter()
        .map(|req| (req, handler.attempt(req)))
        .collect();

    if json {
        let reports: Vec<RequestReport> = attempts
            .iter()
            .map(|(req, attempt)| RequestReport {
                rank: req.rank,
                label: req.to_string(),
                district: req.district.clone(),
                start: (&attempt.start).into(),
                end: (&attempt.end).into(),
                route: (&attempt.route).into(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
        return Ok(());
    }

    for (req, attempt) in &attempts {
        writeln!(out, "{req}")?;
        if !req.district.is_empty() {
            writeln!(out, "  district: {}", req.district)?;
        }
        for (stage, result) in [
            ("start", &attempt.start),
            ("end", &attempt.end),
            ("route", &attempt.route),
        ] {
            match result {
                Ok(segments) => {
                    writeln!(out, "  {stage}:")?;
                    for seg in segments {
                        writeln!(out, "    {seg}")?;
                    }
                }
                Err(e) => writeln!(out, "  {stage}: error: {e}")?,
            }
        }
    }
    Ok(())
}

/// `GeoJSON` of every request that resolves; failures are logged and skipped.
pub fn export<O>(network: &SegmentNetwork, overrides: &O, out: &mut impl Write) -> anyhow::Result<()>
where
    O: OverrideSource + Sync + ?Sized,
{
    let requests = selected_requests(network, None)?;
    let results = resolve_all(network, overrides, requests);

    let resolved: Vec<_> = results
        .iter()
        .filter_map(|(req, result)| match result {
            Ok(resolution) => Some((req, resolution)),
            Err(e) => {
                warn!("Skipping request {req}: {e}");
                None
            }
        })
        .collect();
    info!("Exporting {} of {} requests", resolved.len(), requests.len());

    let collection = resolutions_to_geojson(resolved, requests.len());
    serde_json::to_writer(&mut *out, &collection).context("Failed to write GeoJSON")?;
    writeln!(out)?;
    Ok(())
}

/// DOT graph of one route's links.
pub fn routeviz(network: &SegmentNetwork, route_id: RouteId, out: &mut impl Write) -> anyhow::Result<()> {
    let dot = route_graph_dot(network, route_id)?;
    out.write_all(dot.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use calmmap_core::discovery::NoOverrides;
    use calmmap_core::loading::NetworkBuilder;
    use calmmap_core::{Direction, Segment};
    use geo::line_string;

    use super::*;

    fn network() -> SegmentNetwork {
        let seg = |id, from: &str, to: &str, y0: f64, y1: f64| {
            Segment::new(id, 1, Direction::Both, line_string![(x: 0.0, y: y0), (x: 0.0, y: y1)])
                .unwrap()
                .with_name("TEST LN")
                .with_cross_streets(from, to)
        };
        NetworkBuilder::default()
            .with_segments([seg(1, "A ST", "B ST", 0.0, 1.0), seg(2, "B ST", "C ST", 1.0, 2.0)])
            .with_requests([
                Request::new(1, "Test Ln").from_street("A St").to_street("C St"),
                Request::new(2, "Missing Rd"),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn text_report_lists_stages() {
        let mut out = Vec::new();
        resolve(&network(), &NoOverrides, None, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("1 Test Ln from A St to C St\n  start:\n    1 TEST LN from A ST to B ST\n"));
        assert!(text.contains("2 Missing Rd (all)\n  start: error: No start segments found\n"));
    }

    #[test]
    fn json_report_for_one_rank() {
        let mut out = Vec::new();
        resolve(&network(), &NoOverrides, Some(1), true, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["route"]["segment_ids"], serde_json::json!([1, 2]));
        assert!(json[0]["route"].get("error").is_none());
    }

    #[test]
    fn unknown_rank_is_an_error() {
        let mut out = Vec::new();
        assert!(resolve(&network(), &NoOverrides, Some(9), false, &mut out).is_err());
    }

    #[test]
    fn export_skips_failed_requests() {
        let mut out = Vec::new();
        export(&network(), &NoOverrides, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"].as_array().unwrap().len(), 1);
        assert_eq!(json["features"][0]["properties"]["rank"], 1);
    }
}

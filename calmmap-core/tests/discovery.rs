use calmmap_core::discovery::{NoOverrides, RequestHandler, discover_end, discover_route, discover_start};
use calmmap_core::loading::NetworkBuilder;
use calmmap_core::model::{Direction, Request, Segment, SegmentNetwork};
use calmmap_core::{Error, RouteId, SegmentId};
use geo::line_string;

/// Segment of "TEST LN" running north along x = 0 from y0 to y1
fn street(id: SegmentId, from: &str, to: &str, y0: f64, y1: f64) -> Segment {
    Segment::new(
        id,
        1,
        Direction::Both,
        line_string![(x: 0.0, y: y0), (x: 0.0, y: y1)],
    )
    .unwrap()
    .with_name("TEST LN")
    .with_cross_streets(from, to)
}

fn irrelevant() -> Segment {
    Segment::new(
        10,
        2,
        Direction::Both,
        line_string![(x: 5.0, y: 0.0), (x: 5.0, y: 1.0)],
    )
    .unwrap()
    .with_name("IRRELEVANT PL")
    .with_cross_streets("A ST", "B ST")
}

fn chain(len: u64) -> Vec<Segment> {
    let cross = |i: u64| format!("{} ST", char::from(b'A' + i as u8));
    (1..=len)
        .map(|n| street(n, &cross(n - 1), &cross(n), (n - 1) as f64, n as f64))
        .collect()
}

fn network(segments: impl IntoIterator<Item = Segment>) -> SegmentNetwork {
    NetworkBuilder::default()
        .with_segments(segments)
        .build()
        .unwrap()
}

fn ids(segments: &[Segment]) -> Vec<SegmentId> {
    segments.iter().map(|seg| seg.id).collect()
}

fn pick(segments: &[Segment], wanted: &[SegmentId]) -> Vec<Segment> {
    wanted
        .iter()
        .filter_map(|id| segments.iter().find(|seg| seg.id == *id).cloned())
        .collect()
}

#[test]
fn start_ignores_other_streets() {
    let store = network([street(1, "A ST", "B ST", 0.0, 1.0), irrelevant()]);
    let req = Request::new(1, "Test Ln")
        .from_street("A St")
        .to_street("Nowhere Crs");
    assert_eq!(ids(&discover_start(&store, &req).unwrap()), vec![1]);
}

#[test]
fn start_ignores_quotes_and_case() {
    let quoted = Segment::new(5, 1, Direction::Both, line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0)])
        .unwrap()
        .with_name("TESTN LN")
        .with_cross_streets("AN ST", "B ST");
    let store = network([quoted]);

    let with_quotes = Request::new(1, "Test'n Ln").from_street("A'n St");
    let without = Request::new(2, "testn ln").from_street("An St");
    let a = discover_start(&store, &with_quotes).unwrap();
    let b = discover_start(&store, &without).unwrap();
    assert_eq!(ids(&a), vec![5]);
    assert_eq!(a, b);
}

#[test]
fn start_spanning_two_routes_is_an_error() {
    let other = Segment::new(2, 2, Direction::Both, line_string![(x: 9.0, y: 0.0), (x: 9.0, y: 1.0)])
        .unwrap()
        .with_name("TEST LN")
        .with_cross_streets("A ST", "B ST");
    let store = network([street(1, "A ST", "B ST", 0.0, 1.0), other]);

    let req = Request::new(1, "Test Ln").from_street("A St");
    let err = discover_start(&store, &req).unwrap_err();
    assert!(matches!(err, Error::AmbiguousRoute { routes: 2 }));
}

#[test]
fn end_without_to_is_the_whole_route() {
    let segments = chain(3);
    let store = network(segments.clone());
    let req = Request::new(1, "Test Ln").from_street("B St");

    let end = discover_end(&store, &req, &segments[..1]).unwrap();
    assert_eq!(ids(&end), vec![1, 2, 3]);
}

#[test]
fn end_with_quoted_to() {
    let seg = street(1, "A ST", "BN ST", 0.0, 1.0);
    let store = network([seg.clone()]);
    let req = Request::new(1, "Test Ln").from_street("A St").to_street("B'n St");
    assert_eq!(ids(&discover_end(&store, &req, &[seg]).unwrap()), vec![1]);
}

#[test]
fn route_between_cross_streets() {
    let mut segments = chain(4);
    segments.push(irrelevant());
    let store = network(segments.clone());
    let req = Request::new(1, "Test Ln").from_street("A St").to_street("E St");

    let route = discover_route(&store, &req, &pick(&segments, &[1]), &pick(&segments, &[4])).unwrap();
    assert_eq!(ids(&route), vec![1, 2, 3, 4]);
}

#[test]
fn route_starts_from_a_single_start_segment() {
    let mut segments = chain(4);
    segments.push(irrelevant());
    let store = network(segments.clone());
    let req = Request::new(1, "Test Ln").from_street("A St").to_street("E St");

    let route =
        discover_route(&store, &req, &pick(&segments, &[1, 2]), &pick(&segments, &[4])).unwrap();
    assert_eq!(ids(&route), vec![2, 3, 4]);
}

#[test]
fn whole_street_route() {
    let mut segments = chain(4);
    segments.push(irrelevant());
    let store = network(segments.clone());
    let req = Request::new(1, "Test Ln");

    let route = discover_route(&store, &req, &pick(&segments, &[1]), &pick(&segments, &[4])).unwrap();
    assert_eq!(ids(&route), vec![1, 2, 3, 4]);
}

#[test]
fn route_to_the_end_takes_the_longest_path() {
    let mut segments = chain(5);
    segments.push(irrelevant());
    let store = network(segments.clone());
    let req = Request::new(1, "Test Ln").from_street("A St");

    let route = discover_route(
        &store,
        &req,
        &pick(&segments, &[2]),
        &pick(&segments, &[3, 4, 5]),
    )
    .unwrap();
    assert_eq!(ids(&route), vec![2, 3, 4, 5]);
}

#[test]
fn route_from_and_to_the_same_street_goes_round() {
    let segments = vec![
        street(1, "A ST", "B ST", 0.0, 1.0),
        street(2, "B ST", "A ST", 1.0, 2.0),
    ];
    let store = network(segments.clone());
    let req = Request::new(1, "Test Ln").from_street("A St").to_street("A St");

    let route = discover_route(&store, &req, &segments, &segments).unwrap();
    assert_eq!(ids(&route), vec![1, 2]);
}

#[test]
fn handler_resolves_end_to_end() {
    let mut segments = chain(4);
    segments.push(irrelevant());
    let store = network(segments);
    let req = Request::new(1, "Test Ln").from_street("A St").to_street("E St");

    let resolution = RequestHandler::new(&store, &NoOverrides).handle(&req).unwrap();
    assert_eq!(ids(&resolution.start), vec![1]);
    assert_eq!(ids(&resolution.end), vec![4]);
    assert_eq!(ids(&resolution.route), vec![1, 2, 3, 4]);
}

#[test]
fn one_way_route_is_followed_in_travel_direction() {
    let one_way = |id: SegmentId, route: RouteId, y0: f64, y1: f64| {
        Segment::new(id, route, Direction::FirstToLast, line_string![(x: 0.0, y: y0), (x: 0.0, y: y1)])
            .unwrap()
            .with_name("ONE WAY")
            .with_cross_streets(format!("{y0} ST"), format!("{y1} ST"))
    };
    let store = network([one_way(1, 3, 0.0, 1.0), one_way(2, 3, 1.0, 2.0)]);

    let forward = Request::new(1, "One Way").from_street("0 St").to_street("2 St");
    let backward = Request::new(2, "One Way").from_street("2 St").to_street("0 St");
    let handler = RequestHandler::new(&store, &NoOverrides);

    assert_eq!(ids(&handler.handle(&forward).unwrap().route), vec![1, 2]);
    assert!(matches!(handler.handle(&backward), Err(Error::NoPath)));
}

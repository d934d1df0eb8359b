//! Property tests for the geometry and search invariants.
//!
//! Scenes use integer-valued coordinates and powers, like real inputs.

use proptest::prelude::*;

use quadroute::{find_path, OverlapGraph, PathFinder, Point, SearchStrategy, Transmitter};

fn point() -> impl Strategy<Value = Point> {
    (0i32..=60, 0i32..=60).prop_map(|(x, y)| Point::new(x as f64, y as f64))
}

fn transmitter() -> impl Strategy<Value = Transmitter> {
    (point(), 0i32..=12).prop_map(|(center, power)| Transmitter::new(center, power as f64))
}

fn scene() -> impl Strategy<Value = (Point, Point, Vec<Transmitter>)> {
    (point(), point(), prop::collection::vec(transmitter(), 0..40))
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in point(), b in point()) {
        prop_assert_eq!(a.distance_to(b), b.distance_to(a));
    }

    #[test]
    fn overlap_is_symmetric(p in transmitter(), q in transmitter()) {
        prop_assert_eq!(p.overlaps(&q), q.overlaps(&p));
    }

    #[test]
    fn found_paths_are_valid((start, end, ts) in scene()) {
        let result = find_path(start, end, &ts);
        prop_assert!(result.is_valid_for(start, end));
    }

    #[test]
    fn found_paths_have_no_repeats((start, end, ts) in scene()) {
        let result = find_path(start, end, &ts);
        for (i, a) in result.path.iter().enumerate() {
            prop_assert!(!result.path[i + 1..].contains(a));
        }
    }

    #[test]
    fn bfs_agrees_with_components((start, end, ts) in scene()) {
        let bfs = find_path(start, end, &ts);
        let graph = OverlapGraph::build(&ts);
        prop_assert_eq!(bfs.reachable, graph.connected(start, end));
    }

    #[test]
    fn dfs_is_valid_and_never_shorter((start, end, ts) in scene()) {
        let finder = PathFinder::new(start, end, &ts);
        let bfs = finder.search(SearchStrategy::BreadthFirst);
        let dfs = finder.search(SearchStrategy::DepthFirst);
        prop_assert_eq!(bfs.reachable, dfs.reachable);
        prop_assert!(dfs.is_valid_for(start, end));
        prop_assert!(bfs.path.len() <= dfs.path.len());
    }

    #[test]
    fn queries_are_idempotent((start, end, ts) in scene()) {
        let before = ts.clone();
        let first = find_path(start, end, &ts);
        let second = find_path(start, end, &ts);
        prop_assert_eq!(first, second);
        prop_assert_eq!(ts, before);
    }

    #[test]
    fn reversed_query_has_same_hop_count((start, end, ts) in scene()) {
        let forward = find_path(start, end, &ts);
        let backward = find_path(end, start, &ts);
        prop_assert_eq!(forward.reachable, backward.reachable);
        prop_assert_eq!(forward.path.len(), backward.path.len());
    }
}

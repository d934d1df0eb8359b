//! Reachability search over overlapping transmitters.
//!
//! The agent may only move while inside at least one disk, and may hop
//! between disks that overlap. Nodes are transmitters, edges are overlaps,
//! and the adjacency is never materialized: each expansion scans the input
//! slice for disks overlapping the current one.
//!
//! ## Algorithm
//!
//! Breadth-first search seeded with every transmitter that covers the
//! start point. The first dequeued path whose last disk covers the end
//! point is returned, so the result has the fewest hops. Ties are broken
//! by input order, which is why every scan walks the slice front to back.
//!
//! O(T²) time for T transmitters, O(T) bookkeeping.

use std::collections::{HashSet, VecDeque};

use crate::geometry::{Point, Transmitter};
use crate::graph::OverlapGraph;

/// Outcome of one reachability query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathResult {
    /// Whether the end point can be reached from the start point.
    pub reachable: bool,
    /// Transmitter chain from a start-covering disk to an end-covering one.
    /// Empty when unreachable.
    pub path: Vec<Transmitter>,
    /// Number of frontier entries taken off the queue (or stack).
    pub expanded: usize,
}

impl PathResult {
    pub(crate) fn found(path: Vec<Transmitter>, expanded: usize) -> Self {
        Self { reachable: true, path, expanded }
    }

    pub(crate) fn not_found(expanded: usize) -> Self {
        Self { reachable: false, path: Vec::new(), expanded }
    }

    /// Number of hops between disks (path length minus one).
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Split into the plain `(reachable, path)` pair.
    pub fn into_parts(self) -> (bool, Vec<Transmitter>) {
        (self.reachable, self.path)
    }

    /// Check that the chain actually connects `start` to `end`.
    ///
    /// First disk covers `start`, last covers `end`, every consecutive pair
    /// overlaps. Unreachable results are valid only with an empty path.
    pub fn is_valid_for(&self, start: Point, end: Point) -> bool {
        if !self.reachable {
            return self.path.is_empty();
        }
        match (self.path.first(), self.path.last()) {
            (Some(first), Some(last)) => {
                first.covers(start)
                    && last.covers(end)
                    && self.path.windows(2).all(|w| w[0].overlaps(&w[1]))
            }
            _ => false,
        }
    }
}

/// How to search the overlap graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Fewest hops, implicit adjacency
    #[default]
    BreadthFirst,
    /// Any valid chain, explicit adjacency with backtracking
    DepthFirst,
}

impl SearchStrategy {
    /// Get strategy name as string.
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::BreadthFirst => "bfs",
            SearchStrategy::DepthFirst => "dfs",
        }
    }

    /// Parse strategy from string.
    pub fn from_name(name: &str) -> Option<SearchStrategy> {
        match name.to_lowercase().as_str() {
            "bfs" | "breadth" | "breadth-first" => Some(SearchStrategy::BreadthFirst),
            "dfs" | "depth" | "depth-first" => Some(SearchStrategy::DepthFirst),
            _ => None,
        }
    }

    /// All available strategies.
    pub fn all() -> &'static [SearchStrategy] {
        &[SearchStrategy::BreadthFirst, SearchStrategy::DepthFirst]
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            SearchStrategy::BreadthFirst => "breadth-first, returns a fewest-hop chain",
            SearchStrategy::DepthFirst => "depth-first over a prebuilt overlap graph, returns any chain",
        }
    }
}

/// A single query session: start, end and the transmitters to fly through.
///
/// All bookkeeping lives inside each call, so one `PathFinder` can be
/// queried repeatedly (or shared across threads) with identical results.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    pub start: Point,
    pub end: Point,
    pub transmitters: &'a [Transmitter],
}

/// One frontier entry: a node plus the entry it was reached from.
///
/// Following `parent` links back to a seed spells out the partial path
/// without copying it for every enqueue.
#[derive(Debug, Clone, Copy)]
struct Step {
    node: usize,
    parent: Option<usize>,
}

impl<'a> PathFinder<'a> {
    pub fn new(start: Point, end: Point, transmitters: &'a [Transmitter]) -> Self {
        Self { start, end, transmitters }
    }

    /// Run the search with the given strategy.
    pub fn search(&self, strategy: SearchStrategy) -> PathResult {
        match strategy {
            SearchStrategy::BreadthFirst => self.find_path(),
            SearchStrategy::DepthFirst => {
                OverlapGraph::build(self.transmitters).depth_first_path(self.start, self.end)
            }
        }
    }

    /// Breadth-first search for a fewest-hop chain.
    pub fn find_path(&self) -> PathResult {
        let transmitters = self.transmitters;

        let seeds: Vec<usize> = transmitters
            .iter()
            .enumerate()
            .filter(|(_, t)| t.covers(self.start))
            .map(|(i, _)| i)
            .collect();

        if seeds.is_empty() {
            log::debug!("no transmitter covers start {}", self.start);
            return PathResult::not_found(0);
        }

        if !transmitters.iter().any(|t| t.covers(self.end)) {
            log::debug!("no transmitter covers end {}", self.end);
            return PathResult::not_found(0);
        }

        let mut visited: HashSet<Transmitter> = HashSet::with_capacity(transmitters.len());
        let mut steps: Vec<Step> = Vec::with_capacity(transmitters.len());
        let mut frontier: VecDeque<usize> = VecDeque::with_capacity(seeds.len());

        // Every start-covering disk seeds its own path.
        for node in seeds {
            if visited.insert(transmitters[node]) {
                steps.push(Step { node, parent: None });
                frontier.push_back(steps.len() - 1);
            }
        }

        let mut expanded = 0;

        while let Some(step_idx) = frontier.pop_front() {
            expanded += 1;
            let current = transmitters[steps[step_idx].node];

            if current.covers(self.end) {
                let path = trace_path(transmitters, &steps, step_idx);
                log::debug!(
                    "path found: {} transmitters, {} expanded",
                    path.len(),
                    expanded
                );
                return PathResult::found(path, expanded);
            }

            // Members of the current path are already visited, so this
            // check also keeps cycles out of a single path.
            for (node, candidate) in transmitters.iter().enumerate() {
                if !current.overlaps(candidate) || !visited.insert(*candidate) {
                    continue;
                }
                steps.push(Step { node, parent: Some(step_idx) });
                frontier.push_back(steps.len() - 1);
            }
        }

        log::debug!("frontier exhausted after {} expansions", expanded);
        PathResult::not_found(expanded)
    }

    /// Reachability only, using the given strategy.
    pub fn is_reachable(&self, strategy: SearchStrategy) -> bool {
        self.search(strategy).reachable
    }
}

/// Walk parent links from `last` back to its seed.
fn trace_path(transmitters: &[Transmitter], steps: &[Step], last: usize) -> Vec<Transmitter> {
    let mut path = Vec::new();
    let mut cursor = Some(last);
    while let Some(idx) = cursor {
        let step = steps[idx];
        path.push(transmitters[step.node]);
        cursor = step.parent;
    }
    path.reverse();
    path
}

/// Find a fewest-hop transmitter chain from `start` to `end`.
///
/// Convenience wrapper around [`PathFinder::find_path`].
pub fn find_path(start: Point, end: Point, transmitters: &[Transmitter]) -> PathResult {
    PathFinder::new(start, end, transmitters).find_path()
}

//! Explicit overlap graph over a transmitter set.
//!
//! The breadth-first engine in [`crate::path_finder`] never builds the
//! adjacency. This module does, once, for callers that ask many questions
//! about the same set: connected components, a component-based
//! reachability check, and a depth-first search for any valid chain.
//!
//! Nodes are the distinct transmitters (by value) in input order.

use std::collections::HashSet;

use crate::geometry::{Point, Transmitter};
use crate::path_finder::PathResult;

/// Adjacency lists over distinct transmitters, one edge per overlapping pair.
#[derive(Debug, Clone, Default)]
pub struct OverlapGraph {
    nodes: Vec<Transmitter>,
    adjacency: Vec<Vec<usize>>,
}

impl OverlapGraph {
    /// Build the graph. O(T²) overlap tests.
    pub fn build(transmitters: &[Transmitter]) -> Self {
        let mut seen = HashSet::with_capacity(transmitters.len());
        let nodes: Vec<Transmitter> = transmitters
            .iter()
            .filter(|t| seen.insert(**t))
            .copied()
            .collect();

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if nodes[i].overlaps(&nodes[j]) {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }

        Self { nodes, adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> &[Transmitter] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Transmitter> {
        self.nodes.get(index)
    }

    /// Indices of nodes overlapping `index`, ascending.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn covering(&self, point: Point) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.covers(point))
            .map(|(i, _)| i)
    }

    /// Connected-component label per node.
    ///
    /// Labels are dense, starting at 0, in order of each component's
    /// lowest node index.
    pub fn components(&self) -> Vec<usize> {
        let mut labels = vec![usize::MAX; self.nodes.len()];
        let mut next_label = 0;
        let mut stack = Vec::new();

        for root in 0..self.nodes.len() {
            if labels[root] != usize::MAX {
                continue;
            }
            labels[root] = next_label;
            stack.push(root);
            while let Some(node) = stack.pop() {
                for &next in &self.adjacency[node] {
                    if labels[next] == usize::MAX {
                        labels[next] = next_label;
                        stack.push(next);
                    }
                }
            }
            next_label += 1;
        }

        labels
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        self.components().iter().max().map_or(0, |max| max + 1)
    }

    /// True if any start-covering disk shares a component with any
    /// end-covering disk.
    pub fn connected(&self, start: Point, end: Point) -> bool {
        let labels = self.components();
        let start_labels: HashSet<usize> = self.covering(start).map(|i| labels[i]).collect();
        if start_labels.is_empty() {
            return false;
        }
        self.covering(end).any(|i| start_labels.contains(&labels[i]))
    }

    /// Depth-first search for any chain from `start` to `end`.
    ///
    /// Seeds are tried in input order. The result is valid but not
    /// necessarily the fewest hops.
    pub fn depth_first_path(&self, start: Point, end: Point) -> PathResult {
        if self.covering(end).next().is_none() {
            return PathResult::not_found(0);
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut expanded = 0;

        for seed in self.covering(start) {
            if visited[seed] {
                continue;
            }
            if let Some(trail) = self.depth_first_from(seed, end, &mut visited, &mut expanded) {
                let path = trail.into_iter().map(|i| self.nodes[i]).collect();
                return PathResult::found(path, expanded);
            }
        }

        PathResult::not_found(expanded)
    }

    /// Explore from `seed`, backtracking on dead ends.
    ///
    /// `visited` is shared across seeds: a node already explored from an
    /// earlier seed cannot lead to `end`.
    fn depth_first_from(
        &self,
        seed: usize,
        end: Point,
        visited: &mut [bool],
        expanded: &mut usize,
    ) -> Option<Vec<usize>> {
        visited[seed] = true;
        *expanded += 1;
        if self.nodes[seed].covers(end) {
            return Some(vec![seed]);
        }

        // (node, index of the next neighbor to try)
        let mut stack: Vec<(usize, usize)> = vec![(seed, 0)];

        while let Some((node, cursor)) = stack.last_mut() {
            let node = *node;
            let Some(&next) = self.adjacency[node].get(*cursor) else {
                stack.pop();
                continue;
            };
            *cursor += 1;

            if visited[next] {
                continue;
            }
            visited[next] = true;
            *expanded += 1;

            if self.nodes[next].covers(end) {
                let mut trail: Vec<usize> = stack.iter().map(|(n, _)| *n).collect();
                trail.push(next);
                return Some(trail);
            }
            stack.push((next, 0));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Vec<Transmitter> {
        vec![
            Transmitter::at(2.0, 2.0, 2.0),
            Transmitter::at(6.0, 2.0, 2.0),
            Transmitter::at(2.0, 6.0, 2.0),
            Transmitter::at(6.0, 6.0, 2.0),
            Transmitter::at(10.0, 6.0, 2.0),
            Transmitter::at(9.0, 2.0, 1.0),
        ]
    }

    #[test]
    fn builds_ring_adjacency() {
        let graph = OverlapGraph::build(&ring());
        assert_eq!(graph.node_count(), 6);
        // 0-1, 0-2, 1-3, 1-5, 2-3, 3-4
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.neighbors(1), &[0, 3, 5]);
        assert_eq!(graph.neighbors(4), &[3]);
        assert!(graph.neighbors(99).is_empty());
    }

    #[test]
    fn duplicates_become_one_node() {
        let ts = vec![
            Transmitter::at(0.0, 0.0, 1.0),
            Transmitter::at(0.0, 0.0, 1.0),
            Transmitter::at(5.0, 0.0, 1.0),
        ];
        let graph = OverlapGraph::build(&ts);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node(1), Some(&Transmitter::at(5.0, 0.0, 1.0)));
    }

    #[test]
    fn components_split_isolated_disks() {
        let mut ts = ring();
        ts.push(Transmitter::at(50.0, 50.0, 1.0));
        let graph = OverlapGraph::build(&ts);
        let labels = graph.components();
        assert_eq!(labels[..6], [0, 0, 0, 0, 0, 0]);
        assert_eq!(labels[6], 1);
        assert_eq!(graph.component_count(), 2);
        assert_eq!(OverlapGraph::build(&[]).component_count(), 0);
    }

    #[test]
    fn connected_matches_ring_cases() {
        let graph = OverlapGraph::build(&ring());
        assert!(graph.connected(Point::new(11.0, 6.0), Point::new(10.0, 2.0)));
        assert!(!graph.connected(Point::new(11.0, 6.0), Point::new(12.0, 2.0)));
        assert!(!graph.connected(Point::new(-10.0, -10.0), Point::new(2.0, 2.0)));
    }

    #[test]
    fn connected_considers_every_start_disk() {
        // Only the second disk over the start touches the disk over the end.
        let ts = vec![
            Transmitter::at(-1.0, 0.0, 1.5),
            Transmitter::at(1.0, 0.5, 1.2),
            Transmitter::at(3.0, 0.5, 1.0),
        ];
        let graph = OverlapGraph::build(&ts);
        assert!(graph.connected(Point::new(0.0, 0.0), Point::new(3.5, 0.5)));
    }

    #[test]
    fn depth_first_backtracks_out_of_dead_ends() {
        // From the seed, neighbor 1 is a dead end and is tried first.
        let ts = vec![
            Transmitter::at(0.0, 0.0, 1.0),
            Transmitter::at(0.0, 2.0, 1.0),
            Transmitter::at(2.0, 0.0, 1.0),
            Transmitter::at(4.0, 0.0, 1.0),
        ];
        let graph = OverlapGraph::build(&ts);
        let start = Point::new(-0.5, 0.0);
        let end = Point::new(4.5, 0.0);
        let result = graph.depth_first_path(start, end);
        assert!(result.reachable);
        assert!(result.is_valid_for(start, end));
        assert_eq!(result.path, vec![ts[0], ts[2], ts[3]]);
        assert_eq!(result.expanded, 4);
    }

    #[test]
    fn depth_first_unreachable() {
        let graph = OverlapGraph::build(&ring());
        let result = graph.depth_first_path(Point::new(11.0, 6.0), Point::new(12.0, 2.0));
        assert!(!result.reachable);
        assert!(result.path.is_empty());
    }

    #[test]
    fn depth_first_on_ring_terminates_with_valid_chain() {
        let graph = OverlapGraph::build(&ring());
        let start = Point::new(11.0, 6.0);
        let end = Point::new(10.0, 2.0);
        let result = graph.depth_first_path(start, end);
        assert!(result.is_valid_for(start, end));
        assert!(result.reachable);
    }
}

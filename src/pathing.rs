use smallvec::SmallVec;

use crate::cells::NodeId;
use crate::search::SearchSpace;
use crate::utils::{self, FnvHashMap};

/// Child to parent links recorded while searching.
pub type ParentMap = FnvHashMap<NodeId, NodeId>;

/// What a search saw and found.
///
/// `visited` lists nodes in the order they were first discovered, starting with the start
/// node and never repeating one. `path` runs from start to goal inclusive, and is None when
/// the goal was not reached. That is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub visited: Vec<NodeId>,
    pub path: Option<Vec<NodeId>>,
}

impl SearchResult {
    pub fn found(visited: Vec<NodeId>, path: Vec<NodeId>) -> SearchResult {
        SearchResult { visited, path: Some(path) }
    }

    pub fn not_found(visited: Vec<NodeId>) -> SearchResult {
        SearchResult { visited, path: None }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of edges on the path, if there is one.
    pub fn path_length(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len() - 1)
    }
}

/// Walk the parent links back from `goal` to `start` and return the nodes in start to goal order.
///
/// Panics if the chain of parents from `goal` never reaches `start`: searches only call this
/// once they have discovered the goal.
pub fn reconstruct_path(parents: &ParentMap, start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        current = *parents
            .get(&current)
            .expect("Parent map does not lead back to the start node.");
        path.push(current);
    }

    path.reverse();
    path
}

/// Does `path` go from the start to the goal of `space` through open passages without
/// repeating a node?
pub fn is_valid_path<S: SearchSpace>(space: &S, path: &[NodeId]) -> bool {
    match (path.first(), path.last()) {
        (Some(&first), Some(&last)) if first == space.start() && last == space.goal() => {}
        _ => return false,
    }

    let mut seen = utils::fnv_hashset(path.len());
    if !path.iter().all(|node| seen.insert(*node)) {
        return false;
    }

    path.windows(2)
        .all(|pair| space.visitable_from(pair[0]).contains(&pair[1]))
}

/// Number of steps from one node to every node reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start: NodeId,
    distances: FnvHashMap<NodeId, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start`. Returns None if `start` is not a node of `space`.
    pub fn new<S: SearchSpace>(space: &S, start: NodeId) -> Option<Distances> {
        if start >= space.size() {
            return None;
        }

        let mut distances = utils::fnv_hashmap(space.size());
        distances.insert(start, 0);
        let mut max = 0;

        // Every step costs one, so the first time a node is reached is by a shortest route
        // and the distances map doubles as the visited set.
        let mut frontier = vec![start];
        let mut distance = 0;
        while !frontier.is_empty() {
            distance += 1;
            let mut new_frontier = vec![];
            for node in &frontier {
                for linked in space.visitable_from(*node).iter() {
                    if !distances.contains_key(linked) {
                        distances.insert(*linked, distance);
                        new_frontier.push(*linked);
                        max = distance;
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> NodeId {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None if `node` cannot be reached from the start.
    #[inline(always)]
    pub fn distance_from_start_to(&self, node: NodeId) -> Option<u32> {
        self.distances.get(&node).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Nodes at the maximum distance from the start, in ascending order.
    pub fn furthest_points(&self) -> SmallVec<[NodeId; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(node, _)| *node)
            .collect::<SmallVec<[NodeId; 8]>>();
        furthest.sort_unstable();
        furthest
    }
}

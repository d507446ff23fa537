//! Graph searches from the start to the goal of a maze.
//!
//! Every search returns a `SearchResult`: the nodes in the order they were discovered and
//! the path from start to goal if one was found. The searches only look at a maze through
//! `SearchSpace`, and never change it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use itertools::Itertools;
use lazy_static::lazy_static;
use log::{debug, trace};

use crate::cells::{NodeId, NodeSmallVec};
use crate::errors::*;
use crate::maze::Maze;
use crate::pathing::{self, ParentMap, SearchResult};
use crate::units::Depth;
use crate::utils::{self, FnvHashMap, FnvHashSet};

/// Read only view of a maze that the searches walk over.
pub trait SearchSpace {
    /// Number of nodes, ids run from 0 up to this exclusive.
    fn size(&self) -> usize;
    fn start(&self) -> NodeId;
    fn goal(&self) -> NodeId;
    /// Nodes with an open passage from `node`, in a fixed order.
    fn visitable_from(&self, node: NodeId) -> NodeSmallVec;
}

impl SearchSpace for Maze {
    #[inline]
    fn size(&self) -> usize {
        Maze::size(self)
    }

    #[inline]
    fn start(&self) -> NodeId {
        Maze::start(self)
    }

    #[inline]
    fn goal(&self) -> NodeId {
        Maze::goal(self)
    }

    fn visitable_from(&self, node: NodeId) -> NodeSmallVec {
        self.visitable_neighbours(node)
            .expect("Searches only reach nodes inside the grid.")
    }
}

// Discovery bookkeeping shared by the searches.
struct Discoveries {
    order: Vec<NodeId>,
    seen: FnvHashSet<NodeId>,
    parents: ParentMap,
}

impl Discoveries {
    fn new(start: NodeId, capacity: usize) -> Discoveries {
        let mut seen = utils::fnv_hashset(capacity);
        seen.insert(start);
        Discoveries {
            order: vec![start],
            seen,
            parents: utils::fnv_hashmap(capacity),
        }
    }

    #[inline]
    fn is_discovered(&self, node: NodeId) -> bool {
        self.seen.contains(&node)
    }

    fn discover(&mut self, node: NodeId, parent: NodeId) {
        let first_time = self.seen.insert(node);
        debug_assert!(first_time, "node {} discovered twice", node);
        self.parents.insert(node, parent);
        self.order.push(node);
    }

    fn found(self, start: NodeId, goal: NodeId) -> SearchResult {
        let path = pathing::reconstruct_path(&self.parents, start, goal);
        SearchResult::found(self.order, path)
    }

    fn not_found(self) -> SearchResult {
        SearchResult::not_found(self.order)
    }
}

fn log_outcome(name: &str, result: &SearchResult) {
    match result.path_length() {
        Some(length) => {
            debug!("{}: visited {} nodes, path of {} steps", name, result.visited.len(), length)
        }
        None => debug!("{}: visited {} nodes, no path", name, result.visited.len()),
    }
}

/// Breadth first search with a FIFO queue.
///
/// Nodes are expanded in order of their distance from the start, so the path found is a
/// shortest one.
pub fn breadth_first<S: SearchSpace>(space: &S) -> SearchResult {
    let (start, goal) = (space.start(), space.goal());
    let mut discoveries = Discoveries::new(start, space.size());
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            let result = discoveries.found(start, goal);
            log_outcome("bfs", &result);
            return result;
        }

        for neighbour in space.visitable_from(current).iter() {
            if !discoveries.is_discovered(*neighbour) {
                discoveries.discover(*neighbour, current);
                queue.push_back(*neighbour);
            }
        }
    }

    let result = discoveries.not_found();
    log_outcome("bfs", &result);
    result
}

// One level of the depth first descent: a node and the neighbours still to try from it.
struct Frame {
    node: NodeId,
    remaining: Option<Depth>,
    neighbours: NodeSmallVec,
    next: usize,
}

/// Depth first search, optionally limited to `max_depth` steps from the start.
///
/// Neighbours are tried in the maze's fixed order and the first path reaching the goal is
/// returned straight away, so it is not necessarily the shortest. With a limit, nodes at
/// the limit are discovered but not expanded. Runs on an explicit stack, so large grids
/// cannot exhaust the call stack.
pub fn depth_first<S: SearchSpace>(space: &S, max_depth: Option<Depth>) -> SearchResult {
    let (start, goal) = (space.start(), space.goal());
    let mut discoveries = Discoveries::new(start, space.size());

    if start == goal {
        return discoveries.found(start, goal);
    }

    let mut stack = Vec::new();
    if max_depth != Some(Depth(0)) {
        stack.push(Frame {
            node: start,
            remaining: max_depth,
            neighbours: space.visitable_from(start),
            next: 0,
        });
    }

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.neighbours.len() {
            stack.pop();
            continue;
        }

        let neighbour = frame.neighbours[frame.next];
        frame.next += 1;
        if discoveries.is_discovered(neighbour) {
            continue;
        }

        let parent = frame.node;
        let remaining = frame.remaining.map(|Depth(d)| Depth(d - 1));
        discoveries.discover(neighbour, parent);

        if neighbour == goal {
            let result = discoveries.found(start, goal);
            log_outcome("dfs", &result);
            return result;
        }

        // Out of depth: the neighbour is seen but nothing beyond it.
        if remaining != Some(Depth(0)) {
            stack.push(Frame {
                node: neighbour,
                remaining,
                neighbours: space.visitable_from(neighbour),
                next: 0,
            });
        }
    }

    let result = discoveries.not_found();
    log_outcome("dfs", &result);
    result
}

/// Uniform cost search on a min priority queue of accumulated path cost.
///
/// Every passage costs one. Ties are broken by insertion order, so nodes of equal cost
/// come out first in first out. A node is queued at most once: never again after it has
/// been discovered, whether or not it has been expanded yet.
pub fn uniform_cost<S: SearchSpace>(space: &S) -> SearchResult {
    let (start, goal) = (space.start(), space.goal());
    let mut discoveries = Discoveries::new(start, space.size());

    // (cost, insertion sequence, node), smallest first
    let mut queue = BinaryHeap::new();
    let mut sequence: usize = 0;
    queue.push(Reverse((0u32, sequence, start)));

    while let Some(Reverse((cost, _, current))) = queue.pop() {
        if current == goal {
            let result = discoveries.found(start, goal);
            log_outcome("ucs", &result);
            return result;
        }

        for neighbour in space.visitable_from(current).iter() {
            if !discoveries.is_discovered(*neighbour) {
                discoveries.discover(*neighbour, current);
                sequence += 1;
                queue.push(Reverse((cost + 1, sequence, *neighbour)));
            }
        }
    }

    let result = discoveries.not_found();
    log_outcome("ucs", &result);
    result
}

/// Tunables for iterative deepening.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IterativeDeepening {
    /// Depth of the first probe.
    pub min_depth: usize,
    /// Depth added after each failed probe. Zero is treated as one.
    pub step: usize,
    /// Deepest probe. None means the node count, beyond which no path can exist.
    pub max_depth: Option<usize>,
}

impl Default for IterativeDeepening {
    fn default() -> IterativeDeepening {
        IterativeDeepening {
            min_depth: 1,
            step: 1,
            max_depth: None,
        }
    }
}

/// Run depth limited searches of increasing depth until one finds a path.
///
/// Each probe starts from scratch. Depths go `min_depth`, `min_depth + step`, ... and the
/// last probe is made at exactly the maximum depth, so a larger step only trades extra work
/// at the end for fewer probes. Returns the first result with a path, otherwise the result
/// of the deepest probe.
pub fn iterative_deepening<S: SearchSpace>(space: &S, params: IterativeDeepening) -> SearchResult {
    let max_depth = params.max_depth.unwrap_or_else(|| space.size());
    let step = params.step.max(1);
    let mut depth = params.min_depth.min(max_depth);

    loop {
        trace!("idfs: probing depth {}", depth);
        let result = depth_first(space, Some(Depth(depth)));
        if result.is_found() || depth >= max_depth {
            log_outcome("idfs", &result);
            return result;
        }
        depth = depth.saturating_add(step).min(max_depth);
    }
}

/// A search selectable by name.
pub type SearchFn = fn(&Maze) -> SearchResult;

fn bfs(maze: &Maze) -> SearchResult {
    breadth_first(maze)
}

fn dfs(maze: &Maze) -> SearchResult {
    depth_first(maze, None)
}

fn ucs(maze: &Maze) -> SearchResult {
    uniform_cost(maze)
}

fn idfs(maze: &Maze) -> SearchResult {
    iterative_deepening(maze, IterativeDeepening::default())
}

lazy_static! {
    static ref ALGORITHMS: FnvHashMap<&'static str, SearchFn> = {
        let mut algorithms = utils::fnv_hashmap(4);
        algorithms.insert("BFS", bfs as SearchFn);
        algorithms.insert("DFS", dfs as SearchFn);
        algorithms.insert("UCS", ucs as SearchFn);
        algorithms.insert("IDFS", idfs as SearchFn);
        algorithms
    };
}

/// Look up a search by name, ignoring case.
pub fn algorithm(name: &str) -> Result<SearchFn> {
    ALGORITHMS
        .get(name.to_ascii_uppercase().as_str())
        .cloned()
        .ok_or_else(|| ErrorKind::UnknownAlgorithm(name.to_string()).into())
}

/// Every registered search name, sorted.
pub fn algorithm_names() -> Vec<&'static str> {
    ALGORITHMS.keys().cloned().sorted().collect()
}


#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::pathing::{is_valid_path, Distances};
    use crate::units::GridLength;

    fn maze(length: usize, seed: u64) -> Maze {
        Maze::with_seed(GridLength(length), seed).unwrap()
    }

    fn open_maze(length: usize) -> Maze {
        let mut m = maze(length, 0);
        m.clear();
        m
    }

    fn all_results(m: &Maze) -> Vec<(&'static str, SearchResult)> {
        algorithm_names()
            .into_iter()
            .map(|name| (name, algorithm(name).unwrap()(m)))
            .collect()
    }

    fn has_no_duplicates(nodes: &[NodeId]) -> bool {
        let mut seen = utils::fnv_hashset(nodes.len());
        nodes.iter().all(|n| seen.insert(*n))
    }

    fn shortest_distance(m: &Maze) -> Option<usize> {
        Distances::new(m, m.start())
            .unwrap()
            .distance_from_start_to(m.goal())
            .map(|d| d as usize)
    }

    #[test]
    fn registry_names() {
        assert_eq!(algorithm_names(), vec!["BFS", "DFS", "IDFS", "UCS"]);
        assert!(algorithm("bfs").is_ok());
        assert!(algorithm("Idfs").is_ok());
        match *algorithm("A*").err().unwrap().kind() {
            ErrorKind::UnknownAlgorithm(ref name) => assert_eq!(name, "A*"),
            ref other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn bfs_on_open_three_by_three() {
        let m = open_maze(3);
        let result = breadth_first(&m);
        assert_eq!(result.visited[0], 0);
        let path = result.path.clone().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&8));
        assert!(is_valid_path(&m, &path));
        // clockwise expansion: East then South from every node
        assert_eq!(&result.visited[..3], &[0, 3, 1]);
    }

    #[test]
    fn isolated_goal_has_no_path() {
        let mut m = open_maze(3);
        let goal = m.goal();
        m.set_node_as_obstacle(goal).unwrap();
        for (name, result) in all_results(&m) {
            assert_eq!(result.path, None, "{} found a path", name);
            assert!(!result.visited.contains(&goal), "{} visited the goal", name);
            assert_eq!(result.visited[0], m.start());
        }
    }

    #[test]
    fn exhausted_search_visits_every_reachable_node() {
        let mut m = open_maze(4);
        m.set_node_as_obstacle(15).unwrap();
        for (name, result) in all_results(&m) {
            if name == "IDFS" {
                continue;
            }
            assert_eq!(result.visited.len(), 15, "{} missed reachable nodes", name);
            assert!(has_no_duplicates(&result.visited));
        }
        // deepest probe covers everything too
        let result = iterative_deepening(&m, IterativeDeepening::default());
        assert_eq!(result.visited.len(), 15);
    }

    #[test]
    fn start_is_goal() {
        let mut m = maze(4, 2);
        m.set_goal(m.start()).unwrap();
        for (name, result) in all_results(&m) {
            assert_eq!(result.path, Some(vec![0]), "{}", name);
            assert_eq!(result.visited[0], 0);
        }
    }

    #[test]
    fn every_search_finds_the_only_path_in_a_perfect_maze() {
        fn prop(length: u8, seed: u64) -> bool {
            let m = maze((length % 16) as usize + 1, seed);
            let expected = shortest_distance(&m);
            all_results(&m).into_iter().all(|(_, result)| {
                let path = result.path.expect("perfect mazes are connected");
                is_valid_path(&m, &path) &&
                Some(path.len() - 1) == expected &&
                result.visited[0] == m.start() &&
                has_no_duplicates(&result.visited)
            })
        }
        quickcheck(prop as fn(u8, u64) -> bool);
    }

    #[test]
    fn bfs_and_ucs_are_shortest_with_obstacles() {
        fn prop(seed: u64, obstacles: Vec<u16>, open: bool) -> bool {
            let mut m = maze(7, seed);
            if open {
                m.clear();
            }
            for node in obstacles.into_iter().take(10) {
                let node = node as usize % m.size();
                if node != m.start() {
                    m.set_node_as_obstacle(node).unwrap();
                }
            }
            let expected = shortest_distance(&m);
            [breadth_first(&m), uniform_cost(&m)].iter().all(|result| {
                match (&result.path, expected) {
                    (Some(path), Some(distance)) => {
                        path.len() - 1 == distance && is_valid_path(&m, path)
                    }
                    (None, None) => true,
                    _ => false,
                }
            })
        }
        quickcheck(prop as fn(u64, Vec<u16>, bool) -> bool);
    }

    #[test]
    fn dfs_finds_some_valid_path_on_open_grid() {
        for length in 1..10 {
            let m = open_maze(length);
            let result = depth_first(&m, None);
            let path = result.path.unwrap();
            assert!(is_valid_path(&m, &path));
            assert!(has_no_duplicates(&result.visited));
        }
    }

    #[test]
    fn dfs_follows_clockwise_order() {
        // From node 0 on an open 3x3 grid East (3) is tried before South (1), and the first
        // branch keeps going until it reaches the goal.
        let m = open_maze(3);
        let result = depth_first(&m, None);
        assert_eq!(result.path, Some(vec![0, 3, 6, 7, 8]));
        assert_eq!(result.visited, vec![0, 3, 6, 7, 8]);
    }

    #[test]
    fn dfs_depth_limit() {
        let m = open_maze(3);
        let shallow = depth_first(&m, Some(Depth(1)));
        assert_eq!(shallow.path, None);
        assert_eq!(shallow.visited, vec![0, 3, 1]);

        let nothing = depth_first(&m, Some(Depth(0)));
        assert_eq!(nothing.path, None);
        assert_eq!(nothing.visited, vec![0]);
    }

    #[test]
    fn depth_limited_dfs_threshold_on_perfect_maze() {
        fn prop(length: u8, seed: u64) -> bool {
            let m = maze((length % 12) as usize + 2, seed);
            let distance = shortest_distance(&m).unwrap();
            (0..distance).all(|d| !depth_first(&m, Some(Depth(d))).is_found()) &&
            depth_first(&m, Some(Depth(distance))).path_length() == Some(distance)
        }
        quickcheck(prop as fn(u8, u64) -> bool);
    }

    #[test]
    fn idfs_finds_path_once_deep_enough() {
        let m = maze(10, 4);
        let distance = shortest_distance(&m).unwrap();
        for min_depth in &[0, 1, distance / 2, distance] {
            let params = IterativeDeepening {
                min_depth: *min_depth,
                ..IterativeDeepening::default()
            };
            let result = iterative_deepening(&m, params);
            assert_eq!(result.path_length(), Some(distance));
        }

        let too_shallow = IterativeDeepening {
            min_depth: 1,
            step: 1,
            max_depth: Some(distance - 1),
        };
        assert!(!iterative_deepening(&m, too_shallow).is_found());
    }

    #[test]
    fn idfs_large_step_still_reaches_max_depth() {
        let m = maze(8, 11);
        let distance = shortest_distance(&m).unwrap();
        let params = IterativeDeepening {
            min_depth: 10,
            step: 1000,
            max_depth: None,
        };
        assert_eq!(iterative_deepening(&m, params).path_length(), Some(distance));

        let zero_step = IterativeDeepening {
            min_depth: 0,
            step: 0,
            max_depth: None,
        };
        assert_eq!(iterative_deepening(&m, zero_step).path_length(), Some(distance));
    }

    #[test]
    fn ucs_matches_bfs_discovery_on_unit_costs() {
        for seed in 0..10 {
            let m = maze(9, seed);
            assert_eq!(uniform_cost(&m), breadth_first(&m));
        }
    }

    #[test]
    fn searches_from_the_middle() {
        let mut m = maze(11, 21);
        m.set_start(60).unwrap();
        m.set_goal(0).unwrap();
        let expected = shortest_distance(&m);
        for (name, result) in all_results(&m) {
            let path = result.path.unwrap();
            assert_eq!(path[0], 60, "{}", name);
            assert_eq!(Some(path.len() - 1), expected, "{}", name);
        }
    }
}

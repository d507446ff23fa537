use bit_set::BitSet;
use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::cells::{CompassPrimary, NodeId};
use crate::maze::Maze;

/// Carve a perfect maze with the iterative randomized depth-first backtracker.
///
/// Every existing passage is discarded first. Starting from `start` (a random node if None),
/// the node on top of the stack is examined without popping it: if it has grid neighbours
/// that have not been visited yet one of them is chosen at random, the passage to it is
/// opened and it is pushed. The current node stays on the stack so its other unvisited
/// neighbours can branch off later. Only a node with no unvisited neighbour left is popped.
///
/// Each node other than the start is reached exactly once through a newly opened passage,
/// so the result is a spanning tree: `n - 1` passages, connected and without cycles.
pub fn recursive_backtracker<R: Rng>(maze: &mut Maze, rng: &mut R, start: Option<NodeId>) {
    maze.close_all();

    let nodes_count = maze.size();
    let start_node = start.unwrap_or_else(|| rng.gen_range(0..nodes_count));
    debug!("recursive backtracker over {} nodes from node {}", nodes_count, start_node);

    let mut visited = BitSet::with_capacity(nodes_count);
    let mut stack = Vec::with_capacity(nodes_count);
    visited.insert(start_node);
    stack.push(start_node);

    while let Some(&current) = stack.last() {

        let unvisited_neighbours = CompassPrimary::CLOCKWISE
            .iter()
            .filter_map(|dir| maze.neighbour_at_direction(current, *dir).map(|n| (*dir, n)))
            .filter(|&(_, neighbour)| !visited.contains(neighbour))
            .collect::<SmallVec<[(CompassPrimary, NodeId); 4]>>();

        if let Some(&(dir, next)) = unvisited_neighbours.choose(rng) {
            trace!("carving {:?} from {} to {}", dir, current, next);
            maze.open_passage(current, dir);
            visited.insert(next);
            stack.push(next);
        } else {
            // Dead end, everything around has been carved already.
            stack.pop();
        }
    }

    debug_assert_eq!(visited.len(), nodes_count);
    debug_assert_eq!(maze.links_count(), nodes_count - 1);
}

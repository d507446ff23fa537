use std::fmt;
use std::ops::Range;

use bit_set::BitSet;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{self, Cartesian2DCoordinate, CompassPrimary, NodeId, NodeOptionSmallVec,
                   NodeSmallVec};
use crate::errors::*;
use crate::generators;
use crate::units::{EdgesCount, GridLength};

const DIRECTIONS_COUNT: usize = 4;

/// A square grid of `grid_length²` cells with passages carved between grid neighbours.
///
/// Passages are stored per node and direction: bit `node * 4 + direction` is set when the
/// node has an open passage on that side. Every passage is recorded from both of its ends.
#[derive(Clone)]
pub struct Maze {
    length: GridLength,
    passages: BitSet,
    start: NodeId,
    goal: NodeId,
    rng: XorShiftRng,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: grid length: {}, links: {}, start: {}, goal: {}",
               self.length.0, self.links_count(), self.start, self.goal)
    }
}

impl Maze {
    /// Generate a perfect maze from a seed drawn from the thread rng.
    pub fn new(length: GridLength) -> Result<Maze> {
        Maze::with_seed(length, rand::thread_rng().gen())
    }

    /// Generate a perfect maze. The same seed and length always produce the same maze.
    pub fn with_seed(length: GridLength, seed: u64) -> Result<Maze> {
        let mut maze = Maze::unlinked(length, XorShiftRng::seed_from_u64(seed))?;
        maze.regenerate();
        Ok(maze)
    }

    pub fn generate(length: GridLength, seed: Option<u64>) -> Result<Maze> {
        match seed {
            Some(s) => Maze::with_seed(length, s),
            None => Maze::new(length),
        }
    }

    /// A grid with every passage closed, start at the first node and goal at the last.
    fn unlinked(length: GridLength, rng: XorShiftRng) -> Result<Maze> {
        if length.0 == 0 {
            bail!(ErrorKind::InvalidGridLength(length.0));
        }
        let nodes = length.0
            .checked_mul(length.0)
            .filter(|n| n.checked_mul(DIRECTIONS_COUNT).is_some())
            .ok_or_else(|| ErrorKind::InvalidGridLength(length.0))?;

        Ok(Maze {
            length,
            passages: BitSet::with_capacity(nodes * DIRECTIONS_COUNT),
            start: 0,
            goal: nodes - 1,
            rng,
        })
    }

    /// Discard every passage and carve a new perfect maze from a random node.
    pub fn regenerate(&mut self) {
        let mut rng = self.rng.clone();
        generators::recursive_backtracker(self, &mut rng, None);
        self.rng = rng;
    }

    /// Discard every passage and carve a new perfect maze, starting from `start` when given.
    pub fn regenerate_from(&mut self, start: Option<NodeId>) -> Result<()> {
        if let Some(node) = start {
            self.check_node(node)?;
        }
        let mut rng = self.rng.clone();
        generators::recursive_backtracker(self, &mut rng, start);
        self.rng = rng;
        Ok(())
    }

    #[inline]
    pub fn grid_length(&self) -> GridLength {
        self.length
    }

    /// Total number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.length.nodes().0
    }

    /// Every node id in ascending order.
    #[inline]
    pub fn iter(&self) -> Range<NodeId> {
        0..self.size()
    }

    pub fn random_node(&mut self) -> NodeId {
        let size = self.size();
        self.rng.gen_range(0..size)
    }

    #[inline]
    pub fn is_valid_node(&self, node: NodeId) -> bool {
        node < self.size()
    }

    pub fn node_id_of(&self, coord: Cartesian2DCoordinate) -> Result<NodeId> {
        coord.to_node(self.length)
             .ok_or_else(|| self.coordinate_out_of_range(coord))
    }

    pub fn coord_of(&self, node: NodeId) -> Result<Cartesian2DCoordinate> {
        Cartesian2DCoordinate::from_node(node, self.length)
            .ok_or_else(|| self.node_out_of_range(node))
    }

    #[inline]
    pub fn start(&self) -> NodeId {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> NodeId {
        self.goal
    }

    pub fn set_start(&mut self, node: NodeId) -> Result<()> {
        self.check_node(node)?;
        self.start = node;
        Ok(())
    }

    pub fn set_start_at(&mut self, coord: Cartesian2DCoordinate) -> Result<()> {
        self.start = self.node_id_of(coord)?;
        Ok(())
    }

    pub fn set_goal(&mut self, node: NodeId) -> Result<()> {
        self.check_node(node)?;
        self.goal = node;
        Ok(())
    }

    pub fn set_goal_at(&mut self, coord: Cartesian2DCoordinate) -> Result<()> {
        self.goal = self.node_id_of(coord)?;
        Ok(())
    }

    /// The grid neighbour of a node in one direction, if that side is inside the grid.
    pub fn neighbour_at_direction(&self, node: NodeId, dir: CompassPrimary) -> Option<NodeId> {
        Cartesian2DCoordinate::from_node(node, self.length)
            .and_then(|coord| cells::offset_coordinate(coord, dir, self.length))
            .and_then(|neighbour| neighbour.to_node(self.length))
    }

    /// Cell nodes that are to the North, East, South and West of a node, in that order,
    /// but not necessarily linked by a passage.
    pub fn neighbours_of_id(&self, node: NodeId) -> Result<NodeOptionSmallVec> {
        self.check_node(node)?;
        Ok(CompassPrimary::CLOCKWISE
            .iter()
            .map(|dir| self.neighbour_at_direction(node, *dir))
            .collect())
    }

    pub fn neighbours_of_coord(&self, coord: Cartesian2DCoordinate) -> Result<NodeOptionSmallVec> {
        let node = self.node_id_of(coord)?;
        self.neighbours_of_id(node)
    }

    /// Grid neighbours of a node with an open passage to it, in clockwise order.
    pub fn visitable_neighbours(&self, node: NodeId) -> Result<NodeSmallVec> {
        self.check_node(node)?;
        Ok(CompassPrimary::CLOCKWISE
            .iter()
            .filter(|dir| self.passages.contains(passage_bit(node, **dir)))
            .filter_map(|dir| self.neighbour_at_direction(node, *dir))
            .collect())
    }

    pub fn is_neighbour_linked(&self, node: NodeId, dir: CompassPrimary) -> bool {
        self.is_valid_node(node) && self.passages.contains(passage_bit(node, dir))
    }

    /// Are two nodes in the grid linked? Nodes that are not grid neighbours never are.
    pub fn is_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.direction_between(a, b)
            .map_or(false, |dir| self.is_neighbour_linked(a, dir))
    }

    /// Open a passage between two grid neighbours.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let dir = self.checked_direction_between(a, b)?;
        self.open_passage(a, dir);
        Ok(())
    }

    /// Close the passage between two grid neighbours. Returns true if a passage was open.
    pub fn unlink(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        let dir = self.checked_direction_between(a, b)?;
        let was_linked = self.is_neighbour_linked(a, dir);
        self.close_passage(a, dir);
        Ok(was_linked)
    }

    /// Number of open passages.
    pub fn links_count(&self) -> usize {
        let sides = self.passages.len();
        debug_assert!(sides % 2 == 0, "passage recorded from only one side");
        sides / 2
    }

    /// Upper bound on the passage count: every pair of grid neighbours linked.
    pub fn max_links_count(&self) -> EdgesCount {
        let length = self.length.0;
        EdgesCount(2 * length * (length - 1))
    }

    /// Close every passage between `node` and its grid neighbours. The node stays in the maze.
    pub fn set_node_as_obstacle(&mut self, node: NodeId) -> Result<()> {
        self.check_node(node)?;
        for dir in CompassPrimary::CLOCKWISE.iter() {
            self.close_passage(node, *dir);
        }
        debug!("node {} set as obstacle", node);
        Ok(())
    }

    /// Open the passages between `node` and all of its grid neighbours.
    ///
    /// This opens all four sides whatever they were before `set_node_as_obstacle`, so it
    /// is not an undo when other edits happened in between.
    pub fn clear_node(&mut self, node: NodeId) -> Result<()> {
        self.check_node(node)?;
        for dir in CompassPrimary::CLOCKWISE.iter() {
            self.open_passage(node, *dir);
        }
        debug!("node {} cleared", node);
        Ok(())
    }

    /// Open every passage in the grid, leaving an open field with no walls.
    pub fn clear(&mut self) {
        for node in self.iter() {
            for dir in CompassPrimary::CLOCKWISE.iter() {
                self.open_passage(node, *dir);
            }
        }
        debug!("maze cleared, {} links", self.links_count());
    }

    /// Close every passage.
    pub(crate) fn close_all(&mut self) {
        self.passages.clear();
    }

    /// Open the passage on one side of a node, recording it from both ends.
    /// Does nothing if there is no grid neighbour on that side.
    pub(crate) fn open_passage(&mut self, node: NodeId, dir: CompassPrimary) {
        if let Some(neighbour) = self.neighbour_at_direction(node, dir) {
            self.passages.insert(passage_bit(node, dir));
            self.passages.insert(passage_bit(neighbour, dir.opposite()));
        }
    }

    pub(crate) fn close_passage(&mut self, node: NodeId, dir: CompassPrimary) {
        if let Some(neighbour) = self.neighbour_at_direction(node, dir) {
            self.passages.remove(passage_bit(node, dir));
            self.passages.remove(passage_bit(neighbour, dir.opposite()));
        }
    }

    fn direction_between(&self, a: NodeId, b: NodeId) -> Option<CompassPrimary> {
        CompassPrimary::CLOCKWISE
            .iter()
            .cloned()
            .find(|dir| self.neighbour_at_direction(a, *dir) == Some(b))
    }

    fn checked_direction_between(&self, a: NodeId, b: NodeId) -> Result<CompassPrimary> {
        self.check_node(a)?;
        self.check_node(b)?;
        self.direction_between(a, b)
            .ok_or_else(|| ErrorKind::NotNeighbours(a, b).into())
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if self.is_valid_node(node) {
            Ok(())
        } else {
            Err(self.node_out_of_range(node))
        }
    }

    fn node_out_of_range(&self, node: NodeId) -> Error {
        ErrorKind::OutOfRange(format!("node {} in a grid of {} nodes", node, self.size())).into()
    }

    fn coordinate_out_of_range(&self, coord: Cartesian2DCoordinate) -> Error {
        ErrorKind::OutOfRange(format!("coordinate ({}, {}) in a {}x{} grid",
                                      coord.x, coord.y, self.length.0, self.length.0))
            .into()
    }
}

#[inline]
fn passage_bit(node: NodeId, dir: CompassPrimary) -> usize {
    node * DIRECTIONS_COUNT + dir.index()
}

/// Number of cells along one side of a square maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridLength(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

/// Remaining number of edges a depth limited search may still follow.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct Depth(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub u32);

impl GridLength {
    /// Total node count of a square grid with this side length.
    #[inline]
    pub fn nodes(&self) -> NodesCount {
        NodesCount(self.0 * self.0)
    }

    /// Passage count of a perfect maze on this grid: a spanning tree over every node.
    #[inline]
    pub fn spanning_tree_edges(&self) -> EdgesCount {
        EdgesCount(self.nodes().0.saturating_sub(1))
    }
}

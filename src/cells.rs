use smallvec::SmallVec;

use crate::units::GridLength;

/// A maze cell identifier in the range `0..grid_length²`.
pub type NodeId = usize;

/// Linked (visitable) neighbours of a node, at most one per direction.
pub type NodeSmallVec = SmallVec<[NodeId; 4]>;

/// Grid neighbours of a node in clockwise order. `None` marks a side with no cell.
pub type NodeOptionSmallVec = SmallVec<[Option<NodeId>; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Node id of this coordinate, `x * grid_length + y`.
    /// Returns None if the coordinate is outside the grid.
    #[inline]
    pub fn to_node(&self, length: GridLength) -> Option<NodeId> {
        if self.is_within(length) {
            Some(self.x as usize * length.0 + self.y as usize)
        } else {
            None
        }
    }

    /// Inverse of `to_node`. Returns None if the node id is outside the grid.
    #[inline]
    pub fn from_node(node: NodeId, length: GridLength) -> Option<Cartesian2DCoordinate> {
        if node < length.nodes().0 {
            let x = node / length.0;
            let y = node % length.0;
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_within(&self, length: GridLength) -> bool {
        (self.x as usize) < length.0 && (self.y as usize) < length.0
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Every direction, clockwise from North. Neighbour queries always follow this order.
    pub const CLOCKWISE: [CompassPrimary; 4] = [CompassPrimary::North,
                                                CompassPrimary::East,
                                                CompassPrimary::South,
                                                CompassPrimary::West];

    /// Position of the direction in the clockwise order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 3,
        }
    }

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if the offset falls outside the grid.
///
/// North is `(x, y - 1)`, East `(x + 1, y)`, South `(x, y + 1)` and West `(x - 1, y)`.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary,
                         length: GridLength)
                         -> Option<Cartesian2DCoordinate> {

    let (x, y) = (coord.x, coord.y);
    let offset = match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate::new(x, y - 1))
            } else {
                None
            }
        }
        CompassPrimary::East => x.checked_add(1).map(|x1| Cartesian2DCoordinate::new(x1, y)),
        CompassPrimary::South => y.checked_add(1).map(|y1| Cartesian2DCoordinate::new(x, y1)),
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate::new(x - 1, y))
            } else {
                None
            }
        }
    };

    offset.filter(|c| c.is_within(length))
}

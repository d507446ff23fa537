//! **maze_search** generates perfect grid mazes and runs graph searches over them.
//!
//! A `Maze` carves a spanning tree of passages over a square grid, and can then be edited
//! with obstacles or opened up entirely. The `search` module finds a path from the maze's
//! start to its goal with breadth first, depth first, uniform cost or iterative deepening
//! search, reporting the order nodes were discovered in along with the path.

#[macro_use]
extern crate error_chain;

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid_displays;
pub mod maze;
pub mod pathing;
pub mod projection;
pub mod search;
pub mod units;
mod utils;

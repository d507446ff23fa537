use std::fmt;

use crate::cells::{CompassPrimary, NodeId};
use crate::maze::Maze;
use crate::pathing::{Distances, SearchResult};
use crate::utils::{self, FnvHashSet};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: NodeId) -> String {
        String::from("   ")
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, node: NodeId) -> String {
        if let Some(d) = self.distance_from_start_to(node) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// Start and goal markers, the solution path and optionally every visited node.
#[derive(Debug)]
pub struct SearchDisplay {
    start: NodeId,
    goal: NodeId,
    on_path: FnvHashSet<NodeId>,
    visited: FnvHashSet<NodeId>,
}

impl SearchDisplay {
    pub fn new(maze: &Maze, result: Option<&SearchResult>, show_visited: bool) -> SearchDisplay {
        let on_path = result
            .and_then(|r| r.path.as_ref())
            .map(|path| path.iter().cloned().collect())
            .unwrap_or_else(|| utils::fnv_hashset(0));
        let visited = match result {
            Some(r) if show_visited => r.visited.iter().cloned().collect(),
            _ => utils::fnv_hashset(0),
        };
        SearchDisplay {
            start: maze.start(),
            goal: maze.goal(),
            on_path,
            visited,
        }
    }
}

impl GridDisplay for SearchDisplay {
    fn render_cell_body(&self, node: NodeId) -> String {
        if node == self.start {
            String::from(" S ")
        } else if node == self.goal {
            String::from(" E ")
        } else if self.on_path.contains(&node) {
            String::from(" . ")
        } else if self.visited.contains(&node) {
            String::from(" o ")
        } else {
            String::from("   ")
        }
    }
}

/// Text rendering of a maze, with cell bodies filled in by an optional `GridDisplay`.
pub struct MazeDisplay<'a> {
    maze: &'a Maze,
    cell_bodies: Option<&'a dyn GridDisplay>,
}

impl Maze {
    pub fn display_with<'a>(&'a self, cell_bodies: &'a dyn GridDisplay) -> MazeDisplay<'a> {
        MazeDisplay {
            maze: self,
            cell_bodies: Some(cell_bodies),
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let plain = MazeDisplay {
            maze: self,
            cell_bodies: None,
        };
        fmt::Display::fmt(&plain, f)
    }
}

impl<'a> fmt::Display for MazeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let maze = self.maze;
        let length = maze.grid_length().0;
        // x runs across a printed row, y down the rows.
        let node_at = |x: usize, y: usize| -> NodeId { x * length + y };
        let linked = |node, dir| maze.is_neighbour_linked(node, dir);

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for x in 0..length {
            output.push_str(WALL_LR_3);
            if linked(node_at(x, 0), CompassPrimary::East) {
                output.push_str(WALL_LR);
            } else if x == length - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for y in 0..length {
            let is_last_row = y == length - 1;

            // The west most boundary of the row. The top section of each cell is the
            // south wall of the cell above it, already rendered by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for x in 0..length {
                let node = node_at(x, y);
                let is_last_column = x == length - 1;
                let east_open = linked(node, CompassPrimary::East);
                let south_open = linked(node, CompassPrimary::South);

                match self.cell_bodies {
                    Some(displayer) => row_middle_section_render.push_str(&displayer.render_cell_body(node)),
                    None => row_middle_section_render.push_str("   "),
                }
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if x == 0 {
                    row_bottom_section_render.push_str(if is_last_row {
                        WALL_RU
                    } else if south_open {
                        WALL_UD
                    } else {
                        WALL_RUD
                    });
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east = maze
                            .neighbour_at_direction(node, CompassPrimary::East)
                            .map_or(false, |n| linked(n, CompassPrimary::South));
                        let access_se_from_south = maze
                            .neighbour_at_direction(node, CompassPrimary::South)
                            .map_or(false, |n| linked(n, CompassPrimary::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };
                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::search;
    use crate::units::GridLength;

    #[test]
    fn single_cell() {
        let m = Maze::with_seed(GridLength(1), 0).unwrap();
        assert_eq!(format!("{}", m), "┌───┐\n│   │\n└───┘\n");

        let markers = SearchDisplay::new(&m, None, false);
        assert_eq!(format!("{}", m.display_with(&markers)), "┌───┐\n│ S │\n└───┘\n");
    }

    #[test]
    fn open_two_by_two() {
        let mut m = Maze::with_seed(GridLength(2), 0).unwrap();
        m.clear();
        assert_eq!(format!("{}", m),
                   "┌───────┐\n│       │\n│       │\n│       │\n└───────┘\n");
    }

    #[test]
    fn walled_two_by_two() {
        let mut m = Maze::with_seed(GridLength(2), 0).unwrap();
        m.clear();
        m.set_node_as_obstacle(0).unwrap();
        let text = format!("{}", m);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "┌───┬───┐");
        assert_eq!(lines[1], "│   │   │");
    }

    #[test]
    fn search_overlay() {
        let mut m = Maze::with_seed(GridLength(3), 0).unwrap();
        m.clear();
        let result = search::breadth_first(&m);
        let overlay = SearchDisplay::new(&m, Some(&result), true);
        assert_eq!(overlay.render_cell_body(0), " S ");
        assert_eq!(overlay.render_cell_body(8), " E ");
        let path = result.path.clone().unwrap();
        assert_eq!(overlay.render_cell_body(path[1]), " . ");
        let off_path = m.iter()
            .find(|n| !path.contains(n))
            .unwrap();
        assert_eq!(overlay.render_cell_body(off_path), " o ");

        let hidden = SearchDisplay::new(&m, Some(&result), false);
        assert_eq!(hidden.render_cell_body(off_path), "   ");
    }

    #[test]
    fn distances_overlay() {
        let mut m = Maze::with_seed(GridLength(5), 0).unwrap();
        m.clear();
        let distances = Distances::new(&m, 0).unwrap();
        assert_eq!(distances.render_cell_body(0), " 0 ");
        assert_eq!(distances.render_cell_body(24), " 8 ");
        m.set_node_as_obstacle(12).unwrap();
        let distances = Distances::new(&m, 0).unwrap();
        assert_eq!(distances.render_cell_body(12), "   ");
    }
}

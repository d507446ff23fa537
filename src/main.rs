use docopt::Docopt;
use log::{info, warn};
use serde_derive::Deserialize;
use maze_search::{
    cells::Cartesian2DCoordinate,
    errors::*,
    grid_displays::SearchDisplay,
    maze::Maze,
    pathing::{self, Distances},
    search::{self, IterativeDeepening},
    units::GridLength,
};

const USAGE: &str = "Maze search

Usage:
    maze_search_driver -h | --help
    maze_search_driver --list-algorithms
    maze_search_driver [--grid-size=<n>] [--seed=<s>] [--algorithm=<name>] [--start-x=<x> --start-y=<y>] [(--goal-x=<gx> --goal-y=<gy>)|--furthest-goal] [--open] [--obstacle=<node>...] [--min-depth=<d>] [--depth-step=<d>] [--max-depth=<d>] [--show-visited|--show-distances]

Options:
    -h --help              Show this screen.
    --list-algorithms      List the search algorithms that can be chosen with --algorithm.
    --grid-size=<n>        The maze is n * n cells [default: 17].
    --seed=<s>             Seed for the maze generation, random if not given.
    --algorithm=<name>     Search algorithm: BFS, DFS, UCS or IDFS [default: BFS].
    --start-x=<x>          x coordinate of the search start (default is the first cell).
    --start-y=<y>          y coordinate of the search start.
    --goal-x=<gx>          x coordinate of the search goal (default is the last cell).
    --goal-y=<gy>          y coordinate of the search goal.
    --furthest-goal        Use the cell furthest from the start as the goal.
    --open                 Remove every wall, leaving an open grid.
    --obstacle=<node>      Close every passage around this node id. Can be repeated.
    --min-depth=<d>        First depth probed by IDFS [default: 1].
    --depth-step=<d>       Depth added after each failed IDFS probe [default: 1].
    --max-depth=<d>        Deepest IDFS probe (default is the number of cells).
    --show-visited         Mark every cell the search discovered.
    --show-distances       Show the distance from the start to every reachable cell.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_list_algorithms: bool,
    flag_grid_size: usize,
    flag_seed: Option<u64>,
    flag_algorithm: String,
    flag_start_x: Option<u32>,
    flag_start_y: Option<u32>,
    flag_goal_x: Option<u32>,
    flag_goal_y: Option<u32>,
    flag_furthest_goal: bool,
    flag_open: bool,
    flag_obstacle: Vec<usize>,
    flag_min_depth: usize,
    flag_depth_step: usize,
    flag_max_depth: Option<usize>,
    flag_show_visited: bool,
    flag_show_distances: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.flag_list_algorithms {
        for name in search::algorithm_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut maze = Maze::generate(GridLength(args.flag_grid_size), args.flag_seed)
        .chain_err(|| "Failed to generate the maze")?;
    info!("generated {:?}", maze);

    configure_maze(&mut maze, &args)?;

    let result = if args.flag_algorithm.eq_ignore_ascii_case("IDFS") {
        let params = IterativeDeepening {
            min_depth: args.flag_min_depth,
            step: args.flag_depth_step,
            max_depth: args.flag_max_depth,
        };
        search::iterative_deepening(&maze, params)
    } else {
        let search_fn = search::algorithm(&args.flag_algorithm)?;
        search_fn(&maze)
    };

    if args.flag_show_distances {
        let distances = Distances::new(&maze, maze.start())
            .ok_or("Start node is outside of the maze.")?;
        println!("{}", maze.display_with(&distances));
    } else {
        let overlay = SearchDisplay::new(&maze, Some(&result), args.flag_show_visited);
        println!("{}", maze.display_with(&overlay));
    }

    let start = maze.coord_of(maze.start())?;
    let goal = maze.coord_of(maze.goal())?;
    println!("{} from ({}, {}) to ({}, {}): visited {} cells",
             args.flag_algorithm.to_ascii_uppercase(),
             start.x, start.y, goal.x, goal.y,
             result.visited.len());
    match result.path {
        Some(ref path) => {
            if !pathing::is_valid_path(&maze, path) {
                warn!("search returned a path that does not follow the maze passages");
            }
            println!("path of {} steps", path.len() - 1);
        }
        None => println!("no path"),
    }

    Ok(())
}

/// Apply the start, goal, wall and obstacle options to a freshly generated maze.
fn configure_maze(maze: &mut Maze, args: &MazeArgs) -> Result<()> {

    if args.flag_open {
        maze.clear();
    }

    for node in &args.flag_obstacle {
        maze.set_node_as_obstacle(*node)
            .chain_err(|| format!("Invalid obstacle node {}", node))?;
    }

    if let (Some(x), Some(y)) = (args.flag_start_x, args.flag_start_y) {
        maze.set_start_at(Cartesian2DCoordinate::new(x, y))
            .chain_err(|| "Invalid start coordinate")?;
    }

    if let (Some(x), Some(y)) = (args.flag_goal_x, args.flag_goal_y) {
        maze.set_goal_at(Cartesian2DCoordinate::new(x, y))
            .chain_err(|| "Invalid goal coordinate")?;
    } else if args.flag_furthest_goal {
        let distances = Distances::new(&*maze, maze.start())
            .ok_or("Start node is outside of the maze.")?;
        let furthest = distances.furthest_points()[0];
        info!("furthest cell from the start is {} steps away", distances.max());
        maze.set_goal(furthest)?;
    }

    Ok(())
}

use docopt::Docopt;
use error_chain::bail;
use log::{info, warn};
use maze_carver::{
    analysis::MazeReport,
    cells::{DirectionSource, RandomDirections},
    generators::{HuntAndKill, MazeGenerator, RecursiveBacktracker},
    grid::Grid,
    units,
};
use serde_derive::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Maze Carver

Usage:
    carver_driver -h | --help
    carver_driver [hunt-kill|recursive-backtracker] [(--grid-size=<n>|[--rows=<r> --columns=<c>])] [--seed=<s>] [--text-out=<path>] [--save-edges=<path>] [--no-diagram]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --rows=<r>             The number of rows in a r*c grid [default: 10].
    --columns=<c>          The number of columns in a r*c grid [default: 10].
    --seed=<s>             Seed the random direction source, the same seed always carves the same maze.
    --text-out=<path>      Output file path for a textual rendering of the maze instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --no-diagram           Do not print the textual rendering of the maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_hunt_kill: bool,
    cmd_recursive_backtracker: bool,
    flag_grid_size: Option<usize>,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_save_edges: String,
    flag_no_diagram: bool,
}

// The driver's errors live in an `errors` module, linking in the library's own
// error_chain so `?` works on both.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_carver::errors::Error, ::maze_carver::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (rows, columns) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_rows, args.flag_columns)
    };

    let mut maze_grid = Grid::new(units::RowsCount(rows), units::ColumnsCount(columns))?;

    let directions = match args.flag_seed {
        Some(seed) => RandomDirections::from_seed(seed),
        None => RandomDirections::from_entropy(),
    };
    generate_maze_on_grid(&mut maze_grid, &args, directions)?;

    let report = MazeReport::examine(&maze_grid);
    if report.is_perfect() {
        info!("carved a perfect {}x{} maze with {} passages", rows, columns, report.passages);
    } else {
        warn!("maze failed verification: {:?}", report);
        bail!("generated maze is not a perfect maze: {:?}", report);
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
        info!("saved maze edges to {}", args.flag_save_edges);
    }

    if !args.flag_text_out.is_empty() {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    } else if !args.flag_no_diagram {
        println!("{}", maze_grid);
    }

    Ok(())
}

fn generate_maze_on_grid<D>(maze_grid: &mut Grid, maze_args: &MazeArgs, directions: D) -> Result<()>
    where D: DirectionSource + 'static
{
    let mut generator: Box<dyn MazeGenerator> = if maze_args.cmd_recursive_backtracker {
        Box::new(RecursiveBacktracker::new(directions))
    } else {
        // hunt and kill is the default whether or not it was asked for by name
        Box::new(HuntAndKill::new(directions))
    };
    info!("carving with {}",
          if maze_args.cmd_recursive_backtracker { "recursive backtracker" } else { "hunt and kill" });

    generator.generate(maze_grid)?;
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {
    write_text_to_file(&maze_grid.edge_list(), file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}

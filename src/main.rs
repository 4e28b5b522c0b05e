use docopt::Docopt;
use log::{debug, info};
use mazeframes::{
    generators::MazeAlgorithm,
    grid_dimensions::GridDimensions,
    grids::{Maze, SolvedMaze, WallLayout},
    maze_graph,
    pathing::{self, Relaxation},
    utils,
};
use serde::Serialize;
use serde_derive::Deserialize;
use std::{
    fmt::Display,
    fs::File,
    io,
    io::prelude::*,
    thread,
    time::Duration
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver (backtrack|division) [--width=<w>] [--height=<h>] [--seed=<s>] [--solve] [--relaxation=<r>] [--animate] [--delay=<ms>] [--json-out=<path>] [--walls-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --width=<w>            The grid width in a w*h grid, at most 50 [default: 15].
    --height=<h>           The grid height in a w*h grid, at most 50 [default: 10].
    --seed=<s>             Seed the random number generator for a reproducible maze.
    --solve                Find the shortest path from the top left to the bottom right cell.
    --relaxation=<r>       How the solver updates distances: overwrite or minimum [default: overwrite].
    --animate              Print every frame instead of only the last one.
    --delay=<ms>           Pause between animation frames in milliseconds, 0 to 2000 [default: 100].
    --json-out=<path>      Write the maze (and solution) with all frames as JSON.
    --walls-out=<path>     Write only the final walls of the maze as JSON, a layout the solver accepts.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_backtrack: bool,
    cmd_division: bool,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_solve: bool,
    flag_relaxation: String,
    flag_animate: bool,
    flag_delay: i64,
    flag_json_out: String,
    flag_walls_out: String,
    flag_save_edges: String,
}

#[derive(Serialize)]
struct MazeExport<'a> {
    maze: &'a Maze,
    solution: Option<&'a SolvedMaze>,
}

// The driver's errors wrap the library's errors plus the failures only the command line can hit.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazeframes::errors::Error, ::mazeframes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    debug!("{:?}", args);

    let relaxation = relaxation_from_arg(&args.flag_relaxation)?;
    let delay = Duration::from_millis(utils::clamp_frame_delay(args.flag_delay));

    let algorithm = if args.cmd_division {
        MazeAlgorithm::RecursiveDivision
    } else {
        MazeAlgorithm::RecursiveBacktracker
    };
    let dimensions = GridDimensions::new(args.flag_width, args.flag_height)?;
    let maze = match args.flag_seed {
        Some(seed) => algorithm.generate_seeded(dimensions, seed),
        None => algorithm.generate(dimensions, &mut rand::thread_rng()),
    };
    info!("{:?} generated {}x{} maze in {} frames",
          algorithm,
          maze.width(),
          maze.height(),
          maze.frames_count());

    if args.flag_animate {
        play_frames(maze.frames(), delay);
    } else {
        println!("{}", maze);
    }

    let solution = if args.flag_solve {
        let solved = pathing::solve_with(&maze, relaxation)?;
        if args.flag_animate {
            play_frames(solved.frames(), delay);
        } else {
            println!("{}", solved);
        }
        println!("Path length: {}",
                 solved.path_length().map_or(String::from("none"), |length| length.to_string()));
        Some(solved)
    } else {
        None
    };

    if !args.flag_save_edges.is_empty() {
        write_text_to_file(&maze_graph::edge_list(&maze), &args.flag_save_edges)
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
    }

    if !args.flag_walls_out.is_empty() {
        save_json(&WallLayout::from_maze(&maze), &args.flag_walls_out)?;
    }

    if !args.flag_json_out.is_empty() {
        save_json(&MazeExport {
                      maze: &maze,
                      solution: solution.as_ref(),
                  },
                  &args.flag_json_out)?;
    }

    Ok(())
}

fn relaxation_from_arg(arg: &str) -> Result<Relaxation> {
    match arg.to_lowercase().as_str() {
        "overwrite" => Ok(Relaxation::Overwrite),
        "minimum" => Ok(Relaxation::Minimum),
        other => Err(format!("Unknown relaxation {}, expected overwrite or minimum", other).into()),
    }
}

fn play_frames<F: Display>(frames: &[F], delay: Duration) {
    let last = frames.len().saturating_sub(1);
    for (step, frame) in frames.iter().enumerate() {
        println!("Step {}/{}\n{}", step, last, frame);
        if step != last {
            thread::sleep(delay);
        }
    }
}

fn save_json<T: Serialize>(data: &T, file_name: &str) -> Result<()> {
    let f = File::create(file_name)
        .chain_err(|| format!("Failed to create json file {}", file_name))?;
    serde_json::to_writer(io::BufWriter::new(f), data)?;
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

//! **mazeframes** generates rectangular mazes and solves them, recording every intermediate state
//! as a frame so the construction and the search can be played back step by step.

#[macro_use]
extern crate error_chain;

pub mod cells;
pub mod errors;
pub mod frames;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod grids;
pub mod maze_graph;
pub mod pathing;
pub mod units;
pub mod utils;

use serde_derive::{Deserialize, Serialize};

use crate::cells::{MazeCell, Walls};
use crate::grid::Grid;
use crate::grid_traits::MazeShape;
use crate::pathing::SolverCell;

/// A grid carved by one of the maze generators, with its generation frames.
pub type Maze = Grid<MazeCell>;

/// The working grid of the path solver, with its search and path frames.
pub type SolvedMaze = Grid<SolverCell>;

/// A bare wall configuration, e.g. decoded from JSON produced by another program.
///
/// Nothing is checked on construction; the solver validates the layout before using it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallLayout {
    pub width: usize,
    pub height: usize,
    /// Indexed x then y.
    pub walls: Vec<Vec<Walls>>,
}

impl WallLayout {
    /// Every cell closed on all four sides.
    pub fn closed(width: usize, height: usize) -> WallLayout {
        WallLayout {
            width,
            height,
            walls: vec![vec![Walls::closed(); height]; width],
        }
    }

    /// Copy the walls of any maze.
    pub fn from_maze<M: MazeShape + ?Sized>(maze: &M) -> WallLayout {
        WallLayout {
            width: maze.width(),
            height: maze.height(),
            walls: maze.wall_columns(),
        }
    }
}

impl MazeShape for WallLayout {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn wall_columns(&self) -> Vec<Vec<Walls>> {
        self.walls.clone()
    }
}

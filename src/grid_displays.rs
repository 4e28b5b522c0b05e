use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, MazeCell};
use crate::frames::Frame;
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;
use crate::pathing::SolverCell;

impl GridDisplay for MazeCell {
    fn render_cell_body(&self) -> String {
        if self.current_area {
            String::from(" ░ ")
        } else if self.visited && !self.backtracked {
            // still on the depth first search frontier
            String::from(" # ")
        } else {
            String::from("   ")
        }
    }
}

impl GridDisplay for SolverCell {
    fn render_cell_body(&self) -> String {
        if self.on_path {
            String::from(" . ")
        } else if self.visited {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", self.distance_from_source)
        } else {
            String::from("   ")
        }
    }
}

impl<CellT: Cell + GridDisplay> fmt::Display for Grid<CellT> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid())
    }
}

/// Box-drawing junctions indexed by the arms leaving the junction: left 1, right 2, up 4, down 8.
const JUNCTIONS: [&str; 16] = [
    " ", "╴", "╶", "─", "╵", "┘", "└", "┴",
    "╷", "┐", "┌", "┬", "│", "┤", "├", "┼",
];
const WALL_HORIZONTAL: &str = "───";
const WALL_VERTICAL: &str = "│";

fn junction(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    JUNCTIONS[left as usize | (right as usize) << 1 | (up as usize) << 2 | (down as usize) << 3]
}

/// Is there a wall on the west side of column `x` in row `y`? `x` may be one past the last
/// column, which is the east perimeter.
fn vertical_wall<CellT: Cell>(frame: &Frame<CellT>, x: usize, y: usize) -> bool {
    x == 0 || x == frame.width() ||
    !frame.is_neighbour_linked(Cartesian2DCoordinate::new(x as u32 - 1, y as u32),
                               CompassPrimary::East)
}

/// Is there a wall on the north side of row `y` in column `x`? `y` may be one past the last
/// row, which is the south perimeter.
fn horizontal_wall<CellT: Cell>(frame: &Frame<CellT>, x: usize, y: usize) -> bool {
    y == 0 || y == frame.height() ||
    !frame.is_neighbour_linked(Cartesian2DCoordinate::new(x as u32, y as u32 - 1),
                               CompassPrimary::South)
}

/// The line of horizontal walls and junctions above row `y`.
fn wall_line<CellT: Cell>(frame: &Frame<CellT>, y: usize) -> String {
    let (width, height) = (frame.width(), frame.height());
    let mut line = String::new();
    for x in 0..width + 1 {
        let left = x > 0 && horizontal_wall(frame, x - 1, y);
        let right = x < width && horizontal_wall(frame, x, y);
        let up = y > 0 && vertical_wall(frame, x, y - 1);
        let down = y < height && vertical_wall(frame, x, y);
        line.push_str(junction(left, right, up, down));
        if x < width {
            line.push_str(if right { WALL_HORIZONTAL } else { "   " });
        }
    }
    line.push('\n');
    line
}

impl<CellT: Cell + GridDisplay> fmt::Display for Frame<CellT> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = wall_line(self, 0);

        for (y, row) in self.iter_row().enumerate() {
            // Each cell draws its body then its eastern side.
            output.push_str(WALL_VERTICAL);
            for coord in row {
                match self.cell(coord) {
                    Some(cell) => output.push_str(&cell.render_cell_body()),
                    None => output.push_str("   "),
                }
                let east_wall = vertical_wall(self, coord.x as usize + 1, y);
                output.push_str(if east_wall { WALL_VERTICAL } else { " " });
            }
            output.push('\n');
            output.push_str(&wall_line(self, y + 1));
        }

        write!(f, "{}", output)
    }
}

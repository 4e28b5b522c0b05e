use crate::cells::Walls;

/// Anything that can be read as a rectangular maze: dimensions plus the walls of every cell.
///
/// The solver accepts any `MazeShape`, not only mazes built by this crate's generators, so
/// implementations are free to report inconsistent data; the solver validates it.
pub trait MazeShape {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Wall columns indexed x then y.
    fn wall_columns(&self) -> Vec<Vec<Walls>>;
}

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self) -> String {
        String::from("   ")
    }
}

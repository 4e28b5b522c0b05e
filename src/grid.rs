use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_derive::Serialize;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, Walls};
use crate::frames::Frame;
use crate::grid_dimensions::GridDimensions;
use crate::grid_traits::MazeShape;

/// Which algorithm produced a grid's frames. Renderers use it to decide which cell flags to
/// highlight.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    /// A bare grid no algorithm has run on yet.
    Grid,
    RecursiveBacktrack,
    RecursiveDivision,
    Dijkstra,
}

/// A live grid being worked on by one algorithm, plus the frames it has captured so far.
pub struct Grid<CellT: Cell> {
    current: Frame<CellT>,
    frames: Vec<Frame<CellT>>,
    stack: Vec<Cartesian2DCoordinate>,
    algorithm: Algorithm,
}

impl<CellT: Cell> fmt::Debug for Grid<CellT> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: algorithm: {:?}, width: {:?}, height: {:?}, frames: {:?}",
               self.algorithm,
               self.width(),
               self.height(),
               self.frames.len())
    }
}

impl<CellT: Cell> Grid<CellT> {

    /// A grid whose cells all have four walls and are unvisited. No frame is captured.
    pub fn new(dimensions: GridDimensions, algorithm: Algorithm) -> Grid<CellT> {
        Grid {
            current: Frame::new(dimensions),
            frames: vec![],
            stack: vec![],
            algorithm,
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.current.dimensions()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.current.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.current.height()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.current.size()
    }

    /// The live cells, with the neighbour and passage queries of `Frame`.
    #[inline]
    pub fn grid(&self) -> &Frame<CellT> {
        &self.current
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&CellT> {
        self.current.cell(coord)
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut CellT> {
        self.current.cell_mut(coord)
    }

    /// Append a snapshot of the current cells to the frame history.
    pub fn create_frame(&mut self) {
        let frame = self.current.clone();
        self.frames.push(frame);
    }

    #[inline]
    pub fn frames(&self) -> &[Frame<CellT>] {
        &self.frames
    }

    /// The frame at animation `step`, or None if there is no such step.
    #[inline]
    pub fn frame(&self, step: usize) -> Option<&Frame<CellT>> {
        self.frames.get(step)
    }

    #[inline]
    pub fn frames_count(&self) -> usize {
        self.frames.len()
    }

    /// The cells on the active depth first search path, oldest first.
    #[inline]
    pub fn stack(&self) -> &[Cartesian2DCoordinate] {
        &self.stack
    }

    #[inline]
    pub(crate) fn push_stack(&mut self, coord: Cartesian2DCoordinate) {
        self.stack.push(coord);
    }

    #[inline]
    pub(crate) fn pop_stack(&mut self) -> Option<Cartesian2DCoordinate> {
        self.stack.pop()
    }

    /// Set or clear the wall on one side of a cell and the matching wall of the neighbour
    /// across it, keeping both sides of every edge in agreement. Perimeter sides have no
    /// neighbour so only the cell's own wall changes.
    ///
    /// Returns false if `coord` is outside the grid.
    pub(crate) fn set_wall(&mut self,
                           coord: Cartesian2DCoordinate,
                           direction: CompassPrimary,
                           present: bool)
                           -> bool {
        match self.current.cell_mut(coord) {
            Some(cell) => cell.walls_mut().set(direction, present),
            None => return false,
        }

        if let Some(neighbour_coord) = self.current.neighbour_at_direction(coord, direction) {
            if let Some(neighbour) = self.current.cell_mut(neighbour_coord) {
                neighbour.walls_mut().set(direction.opposite(), present);
            }
        }
        true
    }

    /// Replace every wall of every cell, e.g. to start from an open floor.
    pub(crate) fn set_all_walls(&mut self, walls: Walls) {
        for coord in self.current.iter() {
            if let Some(cell) = self.current.cell_mut(coord) {
                *cell.walls_mut() = walls;
            }
        }
    }

    #[inline]
    pub fn is_neighbour_linked(&self,
                               coord: Cartesian2DCoordinate,
                               direction: CompassPrimary)
                               -> bool {
        self.current.is_neighbour_linked(coord, direction)
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.current.links_count()
    }

    #[inline]
    pub fn has_symmetric_walls(&self) -> bool {
        self.current.has_symmetric_walls()
    }
}

impl<CellT: Cell> MazeShape for Grid<CellT> {
    fn width(&self) -> usize {
        Grid::width(self)
    }

    fn height(&self) -> usize {
        Grid::height(self)
    }

    fn wall_columns(&self) -> Vec<Vec<Walls>> {
        self.current.wall_columns()
    }
}

impl<CellT: Cell + Serialize> Serialize for Grid<CellT> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Grid", 5)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("algorithm", &self.algorithm)?;
        state.serialize_field("grid", &self.current)?;
        state.serialize_field("frames", &self.frames)?;
        state.end()
    }
}

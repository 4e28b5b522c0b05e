use serde::ser::{Serialize, Serializer};
use smallvec::SmallVec;
use std::rc::Rc;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, CoordinateSmallVec, Walls};
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::grid_traits::MazeShape;

/// The whole cell array of a grid at one instant.
///
/// Columns are reference counted and shared between consecutive frames. The owning `Grid`
/// copies a column before writing to it whenever a frame still holds that column, so a frame
/// reads exactly like an independent deep copy and nothing done to the live grid after capture
/// is visible through it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<CellT: Cell> {
    dimensions: GridDimensions,
    columns: Vec<Rc<Vec<CellT>>>,
}

impl<CellT: Cell> Frame<CellT> {

    /// All walls present, nothing visited.
    pub(crate) fn new(dimensions: GridDimensions) -> Frame<CellT> {
        let columns = (0..dimensions.width().0)
            .map(|x| {
                let column = (0..dimensions.height().0)
                    .map(|y| CellT::new(Cartesian2DCoordinate::new(x as u32, y as u32)))
                    .collect::<Vec<CellT>>();
                Rc::new(column)
            })
            .collect();

        Frame {
            dimensions,
            columns,
        }
    }

    /// Copy on write access to a cell.
    pub(crate) fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut CellT> {
        if self.is_valid_coordinate(coord) {
            let column = Rc::make_mut(&mut self.columns[coord.x as usize]);
            column.get_mut(coord.y as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.width().0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.height().0
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&CellT> {
        self.columns
            .get(coord.x as usize)
            .and_then(|column| column.get(coord.y as usize))
    }

    /// The cells of column `x`, top to bottom.
    pub fn column(&self, x: usize) -> Option<&[CellT]> {
        self.columns.get(x).map(|column| column.as_slice())
    }

    /// Every cell, x-major.
    pub fn cells(&self) -> impl Iterator<Item = &CellT> {
        self.columns.iter().flat_map(|column| column.iter())
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(&self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(&self.dimensions)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width() && (coord.y as usize) < self.height()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        direction.offset_coordinate(coord)
                 .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Is there an in-grid neighbour in `direction` with no wall between it and `coord`?
    pub fn is_neighbour_linked(&self,
                               coord: Cartesian2DCoordinate,
                               direction: CompassPrimary)
                               -> bool {
        match (self.cell(coord), self.neighbour_at_direction(coord, direction)) {
            (Some(cell), Some(_)) => !cell.walls().is_present(direction),
            _ => false,
        }
    }

    /// Neighbours reachable from `coord` through an open wall, in N, E, S, W order.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter(|dir| self.is_neighbour_linked(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Every open passage between two cells, each reported once.
    pub fn iter_links(&self)
                      -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter(move |dir| self.is_neighbour_linked(coord, **dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .map(move |neighbour| (coord, neighbour))
                .collect::<SmallVec<[(Cartesian2DCoordinate, Cartesian2DCoordinate); 2]>>()
        })
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    pub fn has_symmetric_walls(&self) -> bool {
        first_asymmetric_wall(self.width(), self.height(), |x, y| {
            *self.columns[x][y].walls()
        })
        .is_none()
    }
}

impl<CellT: Cell> MazeShape for Frame<CellT> {
    fn width(&self) -> usize {
        Frame::width(self)
    }

    fn height(&self) -> usize {
        Frame::height(self)
    }

    fn wall_columns(&self) -> Vec<Vec<Walls>> {
        self.columns
            .iter()
            .map(|column| column.iter().map(|cell| *cell.walls()).collect())
            .collect()
    }
}

/// Serialized as an array of columns, each an array of cells.
impl<CellT: Cell + Serialize> Serialize for Frame<CellT> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.columns.iter().map(|column| column.as_slice()))
    }
}

/// Finds a shared edge whose two sides disagree about the wall, reporting the western or
/// northern cell of the pair and the direction across the edge.
pub(crate) fn first_asymmetric_wall<F>(width: usize,
                                       height: usize,
                                       walls_at: F)
                                       -> Option<(Cartesian2DCoordinate, CompassPrimary)>
    where F: Fn(usize, usize) -> Walls
{
    for x in 0..width {
        for y in 0..height {
            let walls = walls_at(x, y);
            let coord = Cartesian2DCoordinate::new(x as u32, y as u32);

            if x + 1 < width && walls.east != walls_at(x + 1, y).west {
                return Some((coord, CompassPrimary::East));
            }
            if y + 1 < height && walls.south != walls_at(x, y + 1).north {
                return Some((coord, CompassPrimary::South));
            }
        }
    }
    None
}

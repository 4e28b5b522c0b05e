use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::GridDimensions;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// Every coordinate of a grid, x-major: all of column 0 top to bottom, then column 1 etc.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    column_height: usize,
}

impl CellIter {
    pub fn new(dimensions: &GridDimensions) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: dimensions.size().0,
            column_height: dimensions.height().0,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_column_major_index(self.current_cell_number,
                                                                       self.column_height);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Whole rows of coordinates, top to bottom, each row left to right.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_row: usize,
    width: Width,
    height: Height,
}

impl BatchIter {
    pub fn rows(dimensions: &GridDimensions) -> BatchIter {
        BatchIter {
            current_row: 0,
            width: dimensions.width(),
            height: dimensions.height(),
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_row >= self.height.0 {
            return None;
        }

        let row = self.current_row;
        let coords = (0..self.width.0)
            .map(|column| {
                Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(column), RowIndex(row))
            })
            .collect();
        self.current_row += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.height.0 - self.current_row;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

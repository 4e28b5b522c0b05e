use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::Debug;

use crate::units::{ColumnIndex, RowIndex};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Inverse of the x-major cell numbering used by the grid: all of column 0 first, then
    /// column 1 and so on.
    #[inline]
    pub fn from_column_major_index(index: usize, column_height: usize) -> Cartesian2DCoordinate {
        let x = index / column_height;
        let y = index % column_height;
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Every direction, in the order candidate moves are considered.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Creates a new coordinate offset 1 cell away in this direction.
    /// Returns None if the coordinate is not representable. Upper grid bounds are the grid's
    /// business, not checked here.
    pub fn offset_coordinate(self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            CompassPrimary::North => {
                if y > 0 {
                    Some(Cartesian2DCoordinate::new(x, y - 1))
                } else {
                    None
                }
            }
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::West => {
                if x > 0 {
                    Some(Cartesian2DCoordinate::new(x - 1, y))
                } else {
                    None
                }
            }
        }
    }
}

/// The four walls of one cell, `true` meaning the wall is present.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Walls {
    #[serde(rename = "N")]
    pub north: bool,
    #[serde(rename = "E")]
    pub east: bool,
    #[serde(rename = "S")]
    pub south: bool,
    #[serde(rename = "W")]
    pub west: bool,
}

impl Walls {
    pub fn closed() -> Walls {
        Walls {
            north: true,
            east: true,
            south: true,
            west: true,
        }
    }

    pub fn open() -> Walls {
        Walls {
            north: false,
            east: false,
            south: false,
            west: false,
        }
    }

    #[inline]
    pub fn is_present(&self, direction: CompassPrimary) -> bool {
        match direction {
            CompassPrimary::North => self.north,
            CompassPrimary::East => self.east,
            CompassPrimary::South => self.south,
            CompassPrimary::West => self.west,
        }
    }

    #[inline]
    pub fn set(&mut self, direction: CompassPrimary, present: bool) {
        match direction {
            CompassPrimary::North => self.north = present,
            CompassPrimary::East => self.east = present,
            CompassPrimary::South => self.south = present,
            CompassPrimary::West => self.west = present,
        }
    }

    pub fn present_count(&self) -> usize {
        CompassPrimary::ALL.iter().filter(|dir| self.is_present(**dir)).count()
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::closed()
    }
}

/// State every grid cell carries, whatever algorithm owns the grid.
pub trait Cell: Clone + Debug {
    /// A cell with all four walls present that has not been visited.
    fn new(coord: Cartesian2DCoordinate) -> Self;
    fn coordinate(&self) -> Cartesian2DCoordinate;
    fn walls(&self) -> &Walls;
    fn walls_mut(&mut self) -> &mut Walls;
    fn is_visited(&self) -> bool;
    fn set_visited(&mut self, visited: bool);
}

/// Cell of a maze under generation.
///
/// `backtracked` is only used by the recursive backtracker: the carving retreated past this cell
/// after exhausting its neighbours. `current_area` is only used by recursive division: the cell
/// belongs to the region currently being split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeCell {
    #[serde(flatten)]
    coordinate: Cartesian2DCoordinate,
    pub walls: Walls,
    pub visited: bool,
    pub backtracked: bool,
    pub current_area: bool,
}

impl Cell for MazeCell {
    fn new(coord: Cartesian2DCoordinate) -> MazeCell {
        MazeCell {
            coordinate: coord,
            walls: Walls::closed(),
            visited: false,
            backtracked: false,
            current_area: false,
        }
    }

    #[inline(always)]
    fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coordinate
    }

    #[inline(always)]
    fn walls(&self) -> &Walls {
        &self.walls
    }

    #[inline(always)]
    fn walls_mut(&mut self) -> &mut Walls {
        &mut self.walls
    }

    #[inline(always)]
    fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline(always)]
    fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json;

    #[test]
    fn opposite_directions() {
        for dir in &CompassPrimary::ALL {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
        assert_eq!(CompassPrimary::North.opposite(), CompassPrimary::South);
        assert_eq!(CompassPrimary::East.opposite(), CompassPrimary::West);
    }

    #[test]
    fn offset_coordinates() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(CompassPrimary::North.offset_coordinate(gc(0, 0)), None);
        assert_eq!(CompassPrimary::West.offset_coordinate(gc(0, 0)), None);
        assert_eq!(CompassPrimary::South.offset_coordinate(gc(0, 0)), Some(gc(0, 1)));
        assert_eq!(CompassPrimary::East.offset_coordinate(gc(0, 0)), Some(gc(1, 0)));
        assert_eq!(CompassPrimary::North.offset_coordinate(gc(3, 2)), Some(gc(3, 1)));
        assert_eq!(CompassPrimary::West.offset_coordinate(gc(3, 2)), Some(gc(2, 2)));
        assert_eq!(CompassPrimary::East.offset_coordinate(gc(u32::MAX, 0)), None);
    }

    #[test]
    fn column_major_index() {
        assert_eq!(Cartesian2DCoordinate::from_column_major_index(0, 3),
                   Cartesian2DCoordinate::new(0, 0));
        assert_eq!(Cartesian2DCoordinate::from_column_major_index(2, 3),
                   Cartesian2DCoordinate::new(0, 2));
        assert_eq!(Cartesian2DCoordinate::from_column_major_index(4, 3),
                   Cartesian2DCoordinate::new(1, 1));
    }

    #[test]
    fn walls_set_and_count() {
        let mut walls = Walls::closed();
        assert_eq!(walls.present_count(), 4);
        walls.set(CompassPrimary::East, false);
        assert!(!walls.is_present(CompassPrimary::East));
        assert!(walls.is_present(CompassPrimary::West));
        assert_eq!(walls.present_count(), 3);
        assert_eq!(Walls::open().present_count(), 0);
    }

    #[test]
    fn maze_cell_serializes_renderer_fields() {
        let mut cell = MazeCell::new(Cartesian2DCoordinate::new(2, 1));
        cell.walls.set(CompassPrimary::North, false);
        cell.backtracked = true;
        let json = serde_json::to_value(&cell).expect("serialize failed");

        assert_eq!(json["x"], 2);
        assert_eq!(json["y"], 1);
        assert_eq!(json["walls"]["N"], false);
        assert_eq!(json["walls"]["S"], true);
        assert_eq!(json["visited"], false);
        assert_eq!(json["backtracked"], true);
        assert_eq!(json["currentArea"], false);
    }
}

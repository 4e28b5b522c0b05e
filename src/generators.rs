use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;
use std::cmp;
use std::time::Instant;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, Walls};
use crate::errors::*;
use crate::grid::Algorithm;
use crate::grid_dimensions::GridDimensions;
use crate::grids::Maze;

/// The maze generation algorithms on offer.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeAlgorithm {
    RecursiveBacktracker,
    RecursiveDivision,
}

impl MazeAlgorithm {
    pub fn generate<R: Rng + ?Sized>(self, dimensions: GridDimensions, rng: &mut R) -> Maze {
        match self {
            MazeAlgorithm::RecursiveBacktracker => recursive_backtracker(dimensions, rng),
            MazeAlgorithm::RecursiveDivision => recursive_division(dimensions, rng),
        }
    }

    /// Generate with a `XorShiftRng` seeded from `seed`; the same seed always gives the same
    /// maze and frames.
    pub fn generate_seeded(self, dimensions: GridDimensions, seed: u64) -> Maze {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        self.generate(dimensions, &mut rng)
    }
}

pub fn generate_backtrack_maze(width: usize, height: usize) -> Result<Maze> {
    let dimensions = GridDimensions::new(width, height)?;
    Ok(recursive_backtracker(dimensions, &mut rand::thread_rng()))
}

pub fn generate_division_maze(width: usize, height: usize) -> Result<Maze> {
    let dimensions = GridDimensions::new(width, height)?;
    Ok(recursive_division(dimensions, &mut rand::thread_rng()))
}

pub fn seeded_backtrack_maze(width: usize, height: usize, seed: u64) -> Result<Maze> {
    let dimensions = GridDimensions::new(width, height)?;
    Ok(MazeAlgorithm::RecursiveBacktracker.generate_seeded(dimensions, seed))
}

pub fn seeded_division_maze(width: usize, height: usize, seed: u64) -> Result<Maze> {
    let dimensions = GridDimensions::new(width, height)?;
    Ok(MazeAlgorithm::RecursiveDivision.generate_seeded(dimensions, seed))
}

/// Apply the recursive backtracker (randomised depth first search) algorithm to a fresh grid.
///
/// Starting from the top left cell it keeps carving a passage to a random unvisited neighbour,
/// remembering the way it came on the grid's stack. At a dead end the cell is marked as
/// backtracked and carving resumes from the previous cell on the stack. It finishes when the
/// origin is reached again with nothing left to visit, having carved `size - 1` passages: a
/// perfect maze with long winding corridors.
///
/// The depth first search is driven by the explicit stack, never by call recursion, so a
/// 50x50 grid is as safe as a 2x2 one.
pub fn recursive_backtracker<R: Rng + ?Sized>(dimensions: GridDimensions, rng: &mut R) -> Maze {
    let started = Instant::now();
    let mut grid = Maze::new(dimensions, Algorithm::RecursiveBacktrack);

    let origin = Cartesian2DCoordinate::new(0, 0);
    if let Some(cell) = grid.cell_mut(origin) {
        cell.set_visited(true);
    }
    grid.create_frame();

    let mut current = origin;
    loop {
        let moves = unvisited_neighbours(&grid, current);

        if let Some(&(direction, next)) = moves.choose(&mut *rng) {
            grid.set_wall(current, direction, false);
            grid.push_stack(current);
            if let Some(cell) = grid.cell_mut(next) {
                cell.set_visited(true);
            }
            grid.create_frame();
            current = next;

        } else if let Some(previous) = grid.pop_stack() {
            if let Some(cell) = grid.cell_mut(current) {
                cell.backtracked = true;
            }
            grid.create_frame();
            current = previous;

        } else {
            break;
        }
    }

    // The origin is never retreated from, flag it so the last frame shows a fully explored maze.
    if let Some(cell) = grid.cell_mut(origin) {
        cell.backtracked = true;
    }
    grid.create_frame();

    debug!("[Backtracker] {}x{} maze generated in {:?} with {} frames",
           grid.width(),
           grid.height(),
           started.elapsed(),
           grid.frames_count());
    grid
}

fn unvisited_neighbours(grid: &Maze,
                        coord: Cartesian2DCoordinate)
                        -> SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]> {
    CompassPrimary::ALL
        .iter()
        .filter_map(|dir| {
            grid.grid()
                .neighbour_at_direction(coord, *dir)
                .map(|neighbour| (*dir, neighbour))
        })
        .filter(|&(_, neighbour)| grid.cell(neighbour).map_or(false, |cell| !cell.is_visited()))
        .collect()
}

/// A rectangular block of cells still to be divided.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Region {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Region {
    fn contains(&self, coord: Cartesian2DCoordinate) -> bool {
        let (x, y) = (coord.x as usize, coord.y as usize);
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Apply the recursive division algorithm to a fresh grid.
///
/// The grid starts as one open room enclosed by its perimeter walls. Any room wider and taller
/// than a single cell is cut in two by a wall with a single gate in it, and each half is then
/// divided the same way. A room narrower than it is tall gets a horizontal wall, anything else
/// (square rooms included) a vertical one. The rooms form a tree, each wall with one gate
/// joining two connected halves, so the result is a perfect maze of long straight corridors
/// and boxy rooms.
///
/// Rooms are kept on an explicit work stack and divided depth first, the half nearest the
/// origin first.
pub fn recursive_division<R: Rng + ?Sized>(dimensions: GridDimensions, rng: &mut R) -> Maze {
    let started = Instant::now();
    let mut grid = Maze::new(dimensions, Algorithm::RecursiveDivision);
    let (width, height) = (grid.width(), grid.height());

    grid.set_all_walls(Walls::open());
    for coord in grid.grid().iter() {
        if let Some(cell) = grid.cell_mut(coord) {
            cell.current_area = true;
        }
    }
    close_perimeter(&mut grid);
    grid.create_frame();

    let mut regions = vec![Region {
                               x: 0,
                               y: 0,
                               width,
                               height,
                           }];

    while let Some(region) = regions.pop() {

        // A single width or height strip needs no internal wall.
        if region.width <= 1 || region.height <= 1 {
            continue;
        }

        highlight_region(&mut grid, region);
        grid.create_frame();

        let (first_half, second_half) = if region.width < region.height {
            divide_horizontally(&mut grid, region, rng)
        } else {
            divide_vertically(&mut grid, region, rng)
        };

        regions.push(second_half);
        regions.push(first_half);
    }

    for coord in grid.grid().iter() {
        let highlighted = grid.cell(coord).map_or(false, |cell| cell.current_area);
        if highlighted {
            if let Some(cell) = grid.cell_mut(coord) {
                cell.current_area = false;
            }
        }
    }
    grid.create_frame();

    debug!("[Division] {}x{} maze generated in {:?} with {} frames",
           width,
           height,
           started.elapsed(),
           grid.frames_count());
    grid
}

fn close_perimeter(grid: &mut Maze) {
    let (width, height) = (grid.width() as u32, grid.height() as u32);
    for x in 0..width {
        grid.set_wall(Cartesian2DCoordinate::new(x, 0), CompassPrimary::North, true);
        grid.set_wall(Cartesian2DCoordinate::new(x, height - 1), CompassPrimary::South, true);
    }
    for y in 0..height {
        grid.set_wall(Cartesian2DCoordinate::new(0, y), CompassPrimary::West, true);
        grid.set_wall(Cartesian2DCoordinate::new(width - 1, y), CompassPrimary::East, true);
    }
}

/// `current_area` on inside the region, off everywhere else. Only cells whose flag actually
/// changes are written, so untouched columns stay shared with earlier frames.
fn highlight_region(grid: &mut Maze, region: Region) {
    for coord in grid.grid().iter() {
        let inside = region.contains(coord);
        let changed = grid.cell(coord).map_or(false, |cell| cell.current_area != inside);
        if changed {
            if let Some(cell) = grid.cell_mut(coord) {
                cell.current_area = inside;
            }
        }
    }
}

/// Wall off the south side of one row of the region, then open a gate in it. Returns the
/// northern and southern halves.
fn divide_horizontally<R: Rng + ?Sized>(grid: &mut Maze,
                                        region: Region,
                                        rng: &mut R)
                                        -> (Region, Region) {
    let offset = rng.gen_range(0..=region.height - 2);
    let wall_y = (region.y + offset) as u32;

    for x in region.x..region.x + region.width {
        grid.set_wall(Cartesian2DCoordinate::new(x as u32, wall_y),
                      CompassPrimary::South,
                      true);
    }
    grid.create_frame();

    let gate_x = (region.x + gate_offset(region.width, rng)) as u32;
    grid.set_wall(Cartesian2DCoordinate::new(gate_x, wall_y),
                  CompassPrimary::South,
                  false);
    grid.create_frame();

    let north = Region {
        height: offset + 1,
        ..region
    };
    let south = Region {
        y: region.y + offset + 1,
        height: region.height - offset - 1,
        ..region
    };
    (north, south)
}

/// Wall off the east side of one column of the region, then open a gate in it. Returns the
/// western and eastern halves.
fn divide_vertically<R: Rng + ?Sized>(grid: &mut Maze,
                                      region: Region,
                                      rng: &mut R)
                                      -> (Region, Region) {
    let offset = rng.gen_range(0..=region.width - 2);
    let wall_x = (region.x + offset) as u32;

    for y in region.y..region.y + region.height {
        grid.set_wall(Cartesian2DCoordinate::new(wall_x, y as u32),
                      CompassPrimary::East,
                      true);
    }
    grid.create_frame();

    let gate_y = (region.y + gate_offset(region.height, rng)) as u32;
    grid.set_wall(Cartesian2DCoordinate::new(wall_x, gate_y),
                  CompassPrimary::East,
                  false);
    grid.create_frame();

    let west = Region {
        width: offset + 1,
        ..region
    };
    let east = Region {
        x: region.x + offset + 1,
        width: region.width - offset - 1,
        ..region
    };
    (west, east)
}

/// Index of the gate along a wall `length` cells long, never one of the two end cells. A wall
/// two cells long has no inner cell and gets its gate in the far cell.
fn gate_offset<R: Rng + ?Sized>(length: usize, rng: &mut R) -> usize {
    let last_inner = cmp::max(1, length.saturating_sub(2));
    rng.gen_range(1..=last_inner)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::MazeCell;
    use crate::frames::Frame;
    use crate::grid_traits::MazeShape;
    use crate::maze_graph;
    use quickcheck::{QuickCheck, TestResult};

    fn dims(w: usize, h: usize) -> GridDimensions {
        GridDimensions::new(w, h).expect("valid dimensions")
    }

    fn seeded_rng(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    fn perimeter_intact(frame: &Frame<MazeCell>) -> bool {
        let (w, h) = (frame.width() as u32, frame.height() as u32);
        let walls_at = |x, y| frame.cell(Cartesian2DCoordinate::new(x, y)).map(|c| c.walls);
        (0..w).all(|x| {
            walls_at(x, 0).map_or(false, |walls| walls.north) &&
            walls_at(x, h - 1).map_or(false, |walls| walls.south)
        }) &&
        (0..h).all(|y| {
            walls_at(0, y).map_or(false, |walls| walls.west) &&
            walls_at(w - 1, y).map_or(false, |walls| walls.east)
        })
    }

    #[test]
    fn backtracker_single_cell() {
        let maze = recursive_backtracker(dims(1, 1), &mut seeded_rng(1));
        let origin = Cartesian2DCoordinate::new(0, 0);

        assert_eq!(maze.frames_count(), 2);
        let first = maze.frame(0).unwrap().cell(origin).unwrap();
        assert!(first.visited);
        assert!(!first.backtracked);

        let last = maze.frame(1).unwrap().cell(origin).unwrap();
        assert!(last.visited && last.backtracked);
        assert_eq!(last.walls, Walls::closed());
        assert_eq!(maze.links_count(), 0);
    }

    #[test]
    fn backtracker_two_cells() {
        let maze = recursive_backtracker(dims(2, 1), &mut seeded_rng(7));
        // visit origin, carve east, dead end backtrack, final origin backtrack
        assert_eq!(maze.frames_count(), 4);
        assert!(maze.is_neighbour_linked(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East));
        let second = maze.frame(1).unwrap();
        assert!(second.cell(Cartesian2DCoordinate::new(1, 0)).unwrap().visited);
        assert!(!second.cell(Cartesian2DCoordinate::new(1, 0)).unwrap().backtracked);
        let third = maze.frame(2).unwrap();
        assert!(third.cell(Cartesian2DCoordinate::new(1, 0)).unwrap().backtracked);
        assert!(!third.cell(Cartesian2DCoordinate::new(0, 0)).unwrap().backtracked);
    }

    #[test]
    fn backtracker_explores_everything() {
        let maze = recursive_backtracker(dims(8, 5), &mut seeded_rng(42));
        assert!(maze.grid().cells().all(|cell| cell.visited && cell.backtracked));
        assert!(maze.stack().is_empty());
        assert_eq!(maze.algorithm(), Algorithm::RecursiveBacktrack);
        // one frame per visit, one per retreat, one initial and one final
        assert_eq!(maze.frames_count(), 2 * maze.size());
    }

    #[test]
    fn backtracker_same_seed_same_maze() {
        let a = seeded_backtrack_maze(3, 3, 2024).expect("valid dimensions");
        let b = seeded_backtrack_maze(3, 3, 2024).expect("valid dimensions");
        assert_eq!(a.wall_columns(), b.wall_columns());
        assert_eq!(a.frames(), b.frames());
    }

    #[test]
    fn backtracker_max_size_without_recursion() {
        let maze = recursive_backtracker(dims(50, 50), &mut seeded_rng(3));
        assert_eq!(maze.links_count(), 50 * 50 - 1);
        assert_eq!(maze_graph::reachable_from_origin(&maze), 50 * 50);
    }

    #[test]
    fn backtracker_carves_spanning_tree() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 50 + 1, h as usize % 50 + 1);
            let maze = recursive_backtracker(dims(w, h), &mut seeded_rng(seed));
            TestResult::from_bool(maze.links_count() == w * h - 1 &&
                                  maze_graph::reachable_from_origin(&maze) == w * h &&
                                  maze_graph::is_perfect(&maze))
        }
        QuickCheck::new().tests(40).quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn backtracker_frames_keep_walls_symmetric() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 12 + 1, h as usize % 12 + 1);
            let maze = recursive_backtracker(dims(w, h), &mut seeded_rng(seed));
            TestResult::from_bool(maze.frames().iter().all(|frame| frame.has_symmetric_walls()))
        }
        QuickCheck::new().tests(30).quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn division_without_room_to_split() {
        let maze = recursive_division(dims(2, 1), &mut seeded_rng(5));
        assert_eq!(maze.frames_count(), 2);

        let left = maze.cell(Cartesian2DCoordinate::new(0, 0)).unwrap().walls;
        let right = maze.cell(Cartesian2DCoordinate::new(1, 0)).unwrap().walls;
        assert_eq!(left,
                   Walls {
                       north: true,
                       east: false,
                       south: true,
                       west: true,
                   });
        assert_eq!(right,
                   Walls {
                       north: true,
                       east: true,
                       south: true,
                       west: false,
                   });
    }

    #[test]
    fn division_square_room_splits_vertically() {
        let maze = recursive_division(dims(2, 2), &mut seeded_rng(11));
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        // initial, highlight, wall, gate, final
        assert_eq!(maze.frames_count(), 5);
        assert!(maze.frame(0).unwrap().cells().all(|cell| cell.current_area));

        let walled = maze.frame(2).unwrap();
        assert!(walled.cell(gc(0, 0)).unwrap().walls.east);
        assert!(walled.cell(gc(0, 1)).unwrap().walls.east);
        assert!(!walled.cell(gc(0, 0)).unwrap().walls.south);

        // a two cell wall gates in its far cell
        let gated = maze.frame(3).unwrap();
        assert!(gated.cell(gc(0, 0)).unwrap().walls.east);
        assert!(!gated.cell(gc(0, 1)).unwrap().walls.east);
        assert!(!gated.cell(gc(1, 1)).unwrap().walls.west);
    }

    #[test]
    fn division_tall_room_splits_horizontally() {
        let maze = recursive_division(dims(2, 5), &mut seeded_rng(13));
        let walled = maze.frame(2).unwrap();

        let walled_rows = (0..5u32)
            .filter(|y| {
                (0..2u32).all(|x| {
                    walled.cell(Cartesian2DCoordinate::new(x, *y)).unwrap().walls.south
                })
            })
            .count();
        // the bottom perimeter plus the new dividing wall
        assert_eq!(walled_rows, 2);
        assert!((0..5u32).all(|y| {
            !walled.cell(Cartesian2DCoordinate::new(0, y)).unwrap().walls.east
        }));
    }

    #[test]
    fn division_highlight_follows_region() {
        let maze = recursive_division(dims(4, 3), &mut seeded_rng(17));
        let highlight = maze.frame(1).unwrap();
        // The first region is the whole grid.
        assert!(highlight.cells().all(|cell| cell.current_area));
        assert!(maze.grid().cells().all(|cell| !cell.current_area));
        assert_eq!(maze.algorithm(), Algorithm::RecursiveDivision);
    }

    #[test]
    fn division_carves_perfect_maze() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 50 + 1, h as usize % 50 + 1);
            let maze = recursive_division(dims(w, h), &mut seeded_rng(seed));
            TestResult::from_bool(maze.links_count() == w * h - 1 &&
                                  maze_graph::is_perfect(&maze))
        }
        QuickCheck::new().tests(40).quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn division_frames_keep_perimeter_and_symmetry() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 12 + 1, h as usize % 12 + 1);
            let maze = recursive_division(dims(w, h), &mut seeded_rng(seed));
            TestResult::from_bool(maze.frames()
                                      .iter()
                                      .all(|frame| {
                                          perimeter_intact(frame) && frame.has_symmetric_walls()
                                      }))
        }
        QuickCheck::new().tests(30).quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn division_one_gate_per_wall() {
        let maze = recursive_division(dims(9, 7), &mut seeded_rng(23));
        let links = maze.frames().iter().map(|frame| frame.links_count()).collect::<Vec<_>>();

        let mut walls_built = 0;
        let mut gates_opened = 0;
        for (index, pair) in links.windows(2).enumerate() {
            if pair[1] < pair[0] {
                walls_built += 1;
                // the frame right after a new wall opens exactly one passage through it
                assert_eq!(links.get(index + 2), Some(&(pair[1] + 1)));
            } else if pair[1] > pair[0] {
                gates_opened += 1;
                assert_eq!(pair[1], pair[0] + 1);
            }
        }

        assert!(walls_built > 0);
        assert_eq!(walls_built, gates_opened);
        assert_eq!(maze.links_count(), 9 * 7 - 1);
    }

    #[test]
    fn gate_offset_avoids_ends() {
        let mut rng = seeded_rng(99);
        for _ in 0..200 {
            let offset = gate_offset(5, &mut rng);
            assert!(offset >= 1 && offset <= 3);
        }
        assert_eq!(gate_offset(2, &mut rng), 1);
        assert_eq!(gate_offset(3, &mut rng), 1);
    }

    #[test]
    fn zero_dimension_requests_fail() {
        assert!(generate_backtrack_maze(0, 3).is_err());
        assert!(generate_division_maze(3, 0).is_err());
        assert!(generate_backtrack_maze(60, 3).is_ok());
        let clamped = generate_division_maze(60, 70).expect("clamped");
        assert_eq!((clamped.width(), clamped.height()), (50, 50));
    }
}

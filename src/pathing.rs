use itertools::Itertools;
use log::{debug, trace};
use serde::ser::Serializer;
use serde_derive::Serialize;
use std::time::Instant;

use crate::cells::{Cartesian2DCoordinate, Cell, Walls};
use crate::errors::*;
use crate::frames::first_asymmetric_wall;
use crate::grid::{Algorithm, Grid};
use crate::grid_dimensions::{GridDimensions, MAX_GRID_DIMENSION};
use crate::grid_traits::MazeShape;
use crate::grids::SolvedMaze;
use crate::utils;

/// Distance of a cell the search has not reached.
pub const INFINITE_DISTANCE: u32 = u32::MAX;

/// Cell of the solver's working grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverCell {
    #[serde(flatten)]
    coordinate: Cartesian2DCoordinate,
    pub walls: Walls,
    pub visited: bool,
    /// `INFINITE_DISTANCE` until reached, serialized as null.
    #[serde(serialize_with = "serialize_distance")]
    pub distance_from_source: u32,
    pub move_cost: u32,
    pub on_path: bool,
}

impl SolverCell {
    /// The distance from the source, None if unreached.
    #[inline]
    pub fn distance(&self) -> Option<u32> {
        if self.distance_from_source == INFINITE_DISTANCE {
            None
        } else {
            Some(self.distance_from_source)
        }
    }
}

impl Cell for SolverCell {
    fn new(coord: Cartesian2DCoordinate) -> SolverCell {
        SolverCell {
            coordinate: coord,
            walls: Walls::closed(),
            visited: false,
            distance_from_source: INFINITE_DISTANCE,
            move_cost: 1,
            on_path: false,
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

fn serialize_distance<S: Serializer>(distance: &u32, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
    if *distance == INFINITE_DISTANCE {
        serializer.serialize_none()
    } else {
        serializer.serialize_u32(*distance)
    }
}

/// How a neighbour's distance is updated when the search expands a cell next to it.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum Relaxation {
    /// Always replace the neighbour's distance with the distance through the expanded cell.
    #[default]
    Overwrite,
    /// Only ever lower a neighbour's distance.
    Minimum,
}

impl Grid<SolverCell> {
    /// Number of steps on the solved path, None if the target was never reached.
    pub fn path_length(&self) -> Option<u32> {
        let target = Cartesian2DCoordinate::new(self.width() as u32 - 1, self.height() as u32 - 1);
        self.cell(target).and_then(SolverCell::distance)
    }
}

/// Solve a maze from its top left cell to its bottom right cell, see `solve_with`.
pub fn solve<M: MazeShape + ?Sized>(maze: &M) -> Result<SolvedMaze> {
    solve_with(maze, Relaxation::default())
}

/// Dijkstra's shortest path search over the open passages of `maze`, from (0, 0) to
/// (width - 1, height - 1).
///
/// The maze is copied into a fresh grid of `SolverCell`s, only the walls are taken. A frame is
/// captured at the start, after every expanded cell, and for every step walking the path back
/// from the target. The target ends up with its path length as its distance and every cell of
/// the path, both ends included, flagged `on_path`.
///
/// Returns `InvalidDimension` for a zero width or height, `MalformedMazeInput` for wall data
/// that does not describe a consistent grid of at most 50x50, and `UnreachableTarget` if no
/// passage leads to the target.
pub fn solve_with<M: MazeShape + ?Sized>(maze: &M, relaxation: Relaxation) -> Result<SolvedMaze> {
    let started = Instant::now();
    let walls = validated_walls(maze)?;
    let dimensions = GridDimensions::new(maze.width(), maze.height())?;

    let mut grid = SolvedMaze::new(dimensions, Algorithm::Dijkstra);
    for (x, column) in walls.iter().enumerate() {
        for (y, cell_walls) in column.iter().enumerate() {
            if let Some(cell) = grid.cell_mut(Cartesian2DCoordinate::new(x as u32, y as u32)) {
                cell.walls = *cell_walls;
            }
        }
    }

    let source = Cartesian2DCoordinate::new(0, 0);
    let target = Cartesian2DCoordinate::new(grid.width() as u32 - 1, grid.height() as u32 - 1);
    if let Some(cell) = grid.cell_mut(source) {
        cell.distance_from_source = 0;
    }
    grid.create_frame();

    search(&mut grid, target, relaxation);

    if distance_at(&grid, target) == INFINITE_DISTANCE {
        debug!("[Dijkstra] target {:?} unreachable, gave up after {:?}",
               target,
               started.elapsed());
        bail!(ErrorKind::UnreachableTarget(target.x, target.y));
    }

    reconstruct_path(&mut grid, source, target)?;

    debug!("[Dijkstra] {}x{} maze solved in {:?}, path length {}, {} frames",
           grid.width(),
           grid.height(),
           started.elapsed(),
           distance_at(&grid, target),
           grid.frames_count());
    Ok(grid)
}

/// The cells of the solved path, source first.
pub fn shortest_path(solved: &SolvedMaze) -> Vec<Cartesian2DCoordinate> {
    let mut path = solved.grid()
        .iter()
        .filter_map(|coord| solved.cell(coord))
        .filter(|cell| cell.on_path)
        .map(|cell| (cell.distance_from_source, cell.coordinate()))
        .collect::<Vec<_>>();
    path.sort();
    path.into_iter().map(|(_, coord)| coord).collect()
}

fn validated_walls<M: MazeShape + ?Sized>(maze: &M) -> Result<Vec<Vec<Walls>>> {
    let (width, height) = (maze.width(), maze.height());
    if width == 0 {
        bail!(ErrorKind::InvalidDimension("width", width));
    }
    if height == 0 {
        bail!(ErrorKind::InvalidDimension("height", height));
    }
    if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        bail!(ErrorKind::MalformedMazeInput(format!("{}x{} is larger than {}x{}",
                                                    width,
                                                    height,
                                                    MAX_GRID_DIMENSION,
                                                    MAX_GRID_DIMENSION)));
    }

    let walls = maze.wall_columns();
    if walls.len() != width {
        bail!(ErrorKind::MalformedMazeInput(format!("{} wall columns for width {}",
                                                    walls.len(),
                                                    width)));
    }
    if let Some((x, column)) = walls.iter().enumerate().find(|(_, column)| column.len() != height) {
        bail!(ErrorKind::MalformedMazeInput(format!("column {} has {} cells, height is {}",
                                                    x,
                                                    column.len(),
                                                    height)));
    }
    if let Some((coord, direction)) = first_asymmetric_wall(width, height, |x, y| walls[x][y]) {
        bail!(ErrorKind::MalformedMazeInput(format!("walls disagree on the {:?} side of ({}, {})",
                                                    direction,
                                                    coord.x,
                                                    coord.y)));
    }
    Ok(walls)
}

#[inline]
fn distance_at(grid: &SolvedMaze, coord: Cartesian2DCoordinate) -> u32 {
    grid.cell(coord).map_or(INFINITE_DISTANCE, |cell| cell.distance_from_source)
}

/// Expand the closest unvisited cell until the target or an unreachable cell is closest.
fn search(grid: &mut SolvedMaze, target: Cartesian2DCoordinate, relaxation: Relaxation) {
    let mut unvisited = grid.grid().iter().collect::<Vec<_>>();

    while let Some(index) = unvisited.iter().position_min_by_key(|coord| distance_at(grid, **coord)) {
        let current = unvisited.remove(index);
        let current_distance = distance_at(grid, current);
        if current_distance == INFINITE_DISTANCE || current == target {
            break;
        }

        if let Some(cell) = grid.cell_mut(current) {
            cell.set_visited(true);
        }

        let links = grid.grid().links(current);
        for neighbour in links.iter() {
            let (visited, move_cost, existing) = match grid.cell(*neighbour) {
                Some(cell) => (cell.visited, cell.move_cost, cell.distance_from_source),
                None => continue,
            };
            if visited {
                continue;
            }

            let candidate = current_distance.saturating_add(move_cost);
            let relax = match relaxation {
                Relaxation::Overwrite => true,
                Relaxation::Minimum => candidate < existing,
            };
            if relax {
                if let Some(cell) = grid.cell_mut(*neighbour) {
                    cell.distance_from_source = candidate;
                }
            }
        }
        grid.create_frame();

        trace!("[Dijkstra] expanded {:?} at distance {}, {} cells left",
               current,
               current_distance,
               unvisited.len());
    }
}

/// Walk down the distances from the target to the source, marking the path.
fn reconstruct_path(grid: &mut SolvedMaze,
                    source: Cartesian2DCoordinate,
                    target: Cartesian2DCoordinate)
                    -> Result<()> {
    let mut on_path = utils::fnv_hashset(grid.size());
    let mut current = target;

    while current != source {
        if let Some(cell) = grid.cell_mut(current) {
            cell.on_path = true;
        }
        on_path.insert(current);
        grid.create_frame();

        let current_distance = distance_at(grid, current);
        let closest = grid.grid()
            .links(current)
            .iter()
            .filter(|coord| !on_path.contains(*coord))
            .map(|coord| (*coord, distance_at(grid, *coord)))
            .min_by_key(|&(_, distance)| distance);

        match closest {
            Some((next, distance)) if distance < current_distance => current = next,
            _ => bail!(ErrorKind::UnreachableTarget(target.x, target.y)),
        }
    }

    if let Some(cell) = grid.cell_mut(source) {
        cell.on_path = true;
    }
    grid.create_frame();
    Ok(())
}

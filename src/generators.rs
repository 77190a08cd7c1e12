use log::{debug, trace};

use crate::cells::{Direction, DirectionSource, GridCoordinate, DIRECTIONS};
use crate::errors::*;
use crate::grid::Grid;

/// A maze carving algorithm.
///
/// `generate` takes a fully walled, unvisited grid and knocks down walls until every cell is
/// visited and the open passages form a spanning tree of the grid: a perfect maze.
/// An `Err` only signals a grid access defect, the algorithms themselves cannot fail.
pub trait MazeGenerator {
    fn generate(&mut self, grid: &mut Grid) -> Result<()>;
}

/// Apply the hunt and kill maze generation algorithm to a grid.
///
/// Starting in the north west corner we do a random walk ("kill"), carving a passage into
/// each unvisited neighbour we step onto, until the current cell has no unvisited neighbours
/// left. Then we "hunt": scan the grid row by row for the first unvisited cell that borders the
/// visited region, join it to one of its visited neighbours and resume the random walk from it.
/// When a hunt finds nothing the maze is complete.
///
/// Each carve opens exactly one new cell through exactly one wall pair, so a grid of n cells ends
/// up with n - 1 passages and no loops.
/// The random walk tends to give long winding corridors with few dead ends, though the hunt
/// phase does mean rescanning the grid many times.
pub struct HuntAndKill<D: DirectionSource> {
    directions: D,
    current: GridCoordinate,
    complete: bool,
}

impl<D: DirectionSource> HuntAndKill<D> {
    pub fn new(directions: D) -> HuntAndKill<D> {
        HuntAndKill {
            directions,
            current: GridCoordinate::new(0, 0),
            complete: false,
        }
    }

    /// Random walk until the current cell is surrounded by visited cells.
    fn kill(&mut self, grid: &mut Grid) -> Result<()> {
        // The guard is re-checked on every pass; the rejection sampling below relies on it.
        while has_neighbour_where(grid, self.current, false)? {
            let current = self.current;
            let direction = draw_direction_where(&mut self.directions, |dir| {
                neighbour_visited_state(grid, current, dir) == Some(false)
            });
            self.current = carve_passage(grid, current, direction)?;
            grid.mark_visited(self.current)?;
        }
        Ok(())
    }

    /// Find the first unvisited cell, in row-major order, with a visited neighbour and link it to
    /// the visited region. Marks the generation complete if there is no such cell.
    fn hunt(&mut self, grid: &mut Grid) -> Result<()> {
        for coord in grid.iter() {
            if grid.is_visited(coord)? || !has_neighbour_where(grid, coord, true)? {
                continue;
            }

            let direction = draw_direction_where(&mut self.directions, |dir| {
                neighbour_visited_state(grid, coord, dir) == Some(true)
            });
            let _ = carve_passage(grid, coord, direction)?;
            grid.mark_visited(coord)?;
            self.current = coord;
            debug!("hunt found {:?}, joined to the maze {:?}", coord, direction);
            return Ok(());
        }

        self.complete = true;
        Ok(())
    }
}

impl<D: DirectionSource> MazeGenerator for HuntAndKill<D> {
    fn generate(&mut self, grid: &mut Grid) -> Result<()> {
        self.current = GridCoordinate::new(0, 0);
        self.complete = false;

        grid.mark_visited(self.current)?;
        while !self.complete {
            self.kill(grid)?;
            self.hunt(grid)?;
        }

        debug!("hunt and kill carved {} passages over {} cells",
               grid.passages_count(),
               grid.size());
        Ok(())
    }
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A depth first random walk that keeps the path it took on an explicit stack. When the walk is
/// stuck we backtrack along the stack to the most recent cell that still has an unvisited
/// neighbour instead of scanning the whole grid like hunt and kill does. The stack costs memory
/// proportional to the longest corridor, but every cell is only revisited on the way back.
pub struct RecursiveBacktracker<D: DirectionSource> {
    directions: D,
}

impl<D: DirectionSource> RecursiveBacktracker<D> {
    pub fn new(directions: D) -> RecursiveBacktracker<D> {
        RecursiveBacktracker { directions }
    }
}

impl<D: DirectionSource> MazeGenerator for RecursiveBacktracker<D> {
    fn generate(&mut self, grid: &mut Grid) -> Result<()> {
        let start = GridCoordinate::new(0, 0);
        if grid.is_visited(start)? {
            // Already carved, every cell reachable from the start has been visited.
            return Ok(());
        }

        grid.mark_visited(start)?;
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            if has_neighbour_where(grid, current, false)? {
                let direction = draw_direction_where(&mut self.directions, |dir| {
                    neighbour_visited_state(grid, current, dir) == Some(false)
                });
                let next = carve_passage(grid, current, direction)?;
                grid.mark_visited(next)?;
                stack.push(next);
            } else {
                let _ = stack.pop();
            }
        }

        debug!("recursive backtracker carved {} passages over {} cells",
               grid.passages_count(),
               grid.size());
        Ok(())
    }
}

/// Knock down the wall pair between `coord` and its neighbour in `direction`, returning the
/// neighbour. Both cells' flags for the shared edge are cleared together.
pub fn carve_passage(grid: &mut Grid,
                     coord: GridCoordinate,
                     direction: Direction)
                     -> Result<GridCoordinate> {
    let neighbour = grid.neighbour_at_direction(coord, direction)
                        .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(coord.row, coord.column)))?;
    grid.remove_wall(coord, direction)?;
    grid.remove_wall(neighbour, direction.opposite())?;
    trace!("carved {:?} -> {:?}", coord, neighbour);
    Ok(neighbour)
}

/// Keep drawing directions until one is accepted.
/// Only call this once it is known that some direction will be accepted, otherwise it never
/// returns.
fn draw_direction_where<D, F>(directions: &mut D, mut accept: F) -> Direction
    where D: DirectionSource,
          F: FnMut(Direction) -> bool
{
    loop {
        let direction = directions.next_direction();
        if accept(direction) {
            return direction;
        }
    }
}

/// Visited flag of the neighbour in `direction`, None if there is no such neighbour.
fn neighbour_visited_state(grid: &Grid, coord: GridCoordinate, direction: Direction) -> Option<bool> {
    grid.neighbour_at_direction(coord, direction)
        .and_then(|neighbour| grid.is_visited(neighbour).ok())
}

/// Does `coord` have at least one in-grid neighbour whose visited flag equals `visited`?
/// Hunt and kill phases both go through `Grid::neighbour_at_direction`, so they agree on where
/// the last row and column are.
fn has_neighbour_where(grid: &Grid, coord: GridCoordinate, visited: bool) -> Result<bool> {
    for dir in DIRECTIONS.iter() {
        if let Some(neighbour) = grid.neighbour_at_direction(coord, *dir) {
            if grid.is_visited(neighbour)? == visited {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

use error_chain::bail;
use itertools::Itertools;
use std::fmt;
use std::mem;

use crate::cells::{Cell, CoordinateSmallVec, Direction, GridCoordinate, DIRECTIONS};
use crate::errors::*;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// A rectangular matrix of cells, stored row-major.
///
/// The grid is a passive container: it never keeps the two wall flags of a shared edge in step on
/// its own. Anybody calling `remove_wall` is expected to also clear the matching wall on the
/// neighbouring cell, as the generators do.
#[derive(Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {}, columns: {}, visited: {}, passages: {}",
               self.rows, self.columns, self.visited_count(), self.passages_count())
    }
}

impl Grid {
    /// A fully walled grid with every cell unvisited.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        if rows == 0 || columns == 0 {
            bail!(ErrorKind::InvalidDimension(rows, columns));
        }

        // The cell count and the bytes behind it must both be representable.
        let cells_count = rows.checked_mul(columns)
            .filter(|count| {
                count.checked_mul(mem::size_of::<Cell>())
                     .map_or(false, |bytes| bytes <= isize::MAX as usize)
            })
            .ok_or_else(|| Error::from(ErrorKind::InvalidDimension(rows, columns)))?;

        Ok(Grid {
            rows,
            columns,
            cells: vec![Cell::default(); cells_count],
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Vertex and edge counts of the maze: cells and the passages joining them.
    pub fn passage_graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()), EdgesCount(self.passages_count()))
    }

    /// The maze as a plain edge list. Line 1 is `n m`, the vertex and edge counts, then one line
    /// per passage holding the 1-based row-major indices of the two cells it joins.
    pub fn edge_list(&self) -> String {
        let (NodesCount(vertices), EdgesCount(edges)) = self.passage_graph_size();
        let mut graph_data = format!("{} {}\n", vertices, edges);

        let edge_lines = self.iter_passages()
            .filter_map(|(src, dst)| {
                let index_a = self.grid_coordinate_to_index(src)?;
                let index_b = self.grid_coordinate_to_index(dst)?;
                Some(format!("{} {}", index_a + 1, index_b + 1))
            })
            .join("\n");
        if !edge_lines.is_empty() {
            graph_data.push_str(&edge_lines);
            graph_data.push('\n');
        }
        graph_data
    }

    pub fn cell(&self, coord: GridCoordinate) -> Result<&Cell> {
        let index = self.checked_index(coord)?;
        Ok(&self.cells[index])
    }

    pub fn is_visited(&self, coord: GridCoordinate) -> Result<bool> {
        self.cell(coord).map(|cell| cell.visited)
    }

    pub fn mark_visited(&mut self, coord: GridCoordinate) -> Result<()> {
        let index = self.checked_index(coord)?;
        self.cells[index].visited = true;
        Ok(())
    }

    pub fn has_wall(&self, coord: GridCoordinate, direction: Direction) -> Result<bool> {
        self.cell(coord).map(|cell| cell.has_wall(direction))
    }

    /// Knock down one side of an edge. The neighbour's matching wall is left alone.
    pub fn remove_wall(&mut self, coord: GridCoordinate, direction: Direction) -> Result<()> {
        let index = self.checked_index(coord)?;
        self.cells[index].remove_wall(direction);
        Ok(())
    }

    #[inline]
    pub fn neighbour_exists(&self, coord: GridCoordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction).is_some()
    }

    /// The adjacent cell in `direction`, or None when `coord` is on that boundary of the grid
    /// (or is not a grid coordinate at all).
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: Direction)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }

        let GridCoordinate { row, column } = coord;
        match direction {
            Direction::North if row > 0 => Some(GridCoordinate::new(row - 1, column)),
            Direction::South if row < self.rows - 1 => Some(GridCoordinate::new(row + 1, column)),
            Direction::West if column > 0 => Some(GridCoordinate::new(row, column - 1)),
            Direction::East if column < self.columns - 1 => {
                Some(GridCoordinate::new(row, column + 1))
            }
            _ => None,
        }
    }

    /// Cells that are to the North, South, East or West of a particular cell, whether or not
    /// a passage leads to them.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        DIRECTIONS.iter()
                  .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                  .collect()
    }

    /// Is there an in-grid neighbour in `direction` with no wall on this cell's side of the edge?
    pub fn is_passage_open(&self, coord: GridCoordinate, direction: Direction) -> bool {
        self.neighbour_exists(coord, direction) &&
        self.has_wall(coord, direction).map_or(false, |wall| !wall)
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visited).count()
    }

    pub fn is_fully_visited(&self) -> bool {
        self.cells.iter().all(|cell| cell.visited)
    }

    /// Every open edge exactly once, as a (cell, east or south neighbour) pair.
    /// Only the first cell's wall flag is consulted.
    pub fn iter_passages<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            let east = self.passage_neighbour(coord, Direction::East);
            let south = self.passage_neighbour(coord, Direction::South);
            east.into_iter().chain(south).map(move |neighbour| (coord, neighbour))
        })
    }

    pub fn passages_count(&self) -> usize {
        self.iter_passages().count()
    }

    /// Row-major position of a coordinate.
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns + coord.column)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns,
            cells_count: self.size(),
        }
    }

    fn passage_neighbour(&self, coord: GridCoordinate, direction: Direction) -> Option<GridCoordinate> {
        if self.is_passage_open(coord, direction) {
            self.neighbour_at_direction(coord, direction)
        } else {
            None
        }
    }

    fn checked_index(&self, coord: GridCoordinate) -> Result<usize> {
        self.grid_coordinate_to_index(coord)
            .ok_or_else(|| ErrorKind::OutOfBounds(coord.row, coord.column).into())
    }
}

/// Row-major iteration over the grid coordinates: row outer, column inner.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::new(self.current_cell_number / self.columns,
                                            self.current_cell_number % self.columns);
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

// This form is useful if you have the Grid by value and take a reference to it
impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Box-drawing glyph for a wall junction, indexed by the arms leaving it:
/// bit 0 up, bit 1 down, bit 2 left, bit 3 right.
const JUNCTIONS: [&str; 16] = [" ", "╵", "╷", "│", "╴", "┘", "┐", "┤",
                               "╶", "└", "┌", "├", "─", "┴", "┬", "┼"];

impl Grid {
    /// Wall on the vertical line `boundary` (0 to columns inclusive) beside cells in `row`.
    fn vertical_wall_at(&self, row: usize, boundary: usize) -> bool {
        boundary == 0 || boundary == self.columns ||
        !self.is_passage_open(GridCoordinate::new(row, boundary - 1), Direction::East)
    }

    /// Wall on the horizontal line `boundary` (0 to rows inclusive) above or below `column`.
    fn horizontal_wall_at(&self, boundary: usize, column: usize) -> bool {
        boundary == 0 || boundary == self.rows ||
        !self.is_passage_open(GridCoordinate::new(boundary - 1, column), Direction::South)
    }

    fn junction(&self, boundary_row: usize, boundary_column: usize) -> &'static str {
        let up = boundary_row > 0 && self.vertical_wall_at(boundary_row - 1, boundary_column);
        let down = boundary_row < self.rows && self.vertical_wall_at(boundary_row, boundary_column);
        let left = boundary_column > 0 &&
                   self.horizontal_wall_at(boundary_row, boundary_column - 1);
        let right = boundary_column < self.columns &&
                    self.horizontal_wall_at(boundary_row, boundary_column);
        JUNCTIONS[(up as usize) | (down as usize) << 1 | (left as usize) << 2 |
                  (right as usize) << 3]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Cells are three glyphs wide. Lines alternate between wall junctions joined by the
        // horizontal walls, and cell bodies separated by the vertical walls.
        let mut output = String::new();
        for boundary_row in 0..=self.rows {
            for column in 0..self.columns {
                output.push_str(self.junction(boundary_row, column));
                output.push_str(if self.horizontal_wall_at(boundary_row, column) {
                    "───"
                } else {
                    "   "
                });
            }
            output.push_str(self.junction(boundary_row, self.columns));
            output.push('\n');

            if boundary_row == self.rows {
                break;
            }
            for boundary_column in 0..=self.columns {
                let wall = self.vertical_wall_at(boundary_row, boundary_column);
                output.push_str(if wall { "│" } else { " " });
                if boundary_column < self.columns {
                    output.push_str("   ");
                }
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

use petgraph::unionfind::UnionFind;

use crate::cells::{Direction, GridCoordinate};
use crate::grid::Grid;
use crate::utils;

/// Structural summary of a carved grid.
///
/// A grid is a perfect maze when its passages form a spanning tree of the grid graph: every cell
/// is visited, there is exactly one component, no passage closes a loop, n - 1 passages join the
/// n cells and no wall pair has been knocked down on one side only.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeReport {
    pub cells: usize,
    pub visited: usize,
    pub passages: usize,
    pub components: usize,
    pub largest_component: usize,
    pub cycles: usize,
    pub one_sided_walls: usize,
}

impl MazeReport {
    pub fn examine(grid: &Grid) -> MazeReport {
        let cells = grid.size();
        let mut sets = UnionFind::<usize>::new(cells);
        let mut passages = 0;
        let mut cycles = 0;

        for (a, b) in grid.iter_passages() {
            passages += 1;
            let (index_a, index_b) = (cell_index(grid, a), cell_index(grid, b));

            // union returns false when both cells were already connected
            if !sets.union(index_a, index_b) {
                cycles += 1;
            }
        }

        let mut component_sizes = utils::fnv_hashmap::<usize, usize>(cells);
        for root in sets.into_labeling() {
            *component_sizes.entry(root).or_insert(0) += 1;
        }

        MazeReport {
            cells,
            visited: grid.visited_count(),
            passages,
            components: component_sizes.len(),
            largest_component: component_sizes.values().cloned().max().unwrap_or(0),
            cycles,
            one_sided_walls: one_sided_walls(grid),
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.visited == self.cells && self.passages + 1 == self.cells && self.components == 1 &&
        self.cycles == 0 && self.one_sided_walls == 0
    }
}

/// Count the edges where one cell's wall is down and its neighbour's matching wall is still up.
pub fn one_sided_walls(grid: &Grid) -> usize {
    let mut seen = utils::fnv_hashset::<(GridCoordinate, GridCoordinate)>(grid.size());

    for coord in grid.iter() {
        for &dir in &[Direction::East, Direction::South] {
            if let Some(neighbour) = grid.neighbour_at_direction(coord, dir) {
                let near_open = !grid.has_wall(coord, dir).unwrap_or(true);
                let far_open = !grid.has_wall(neighbour, dir.opposite()).unwrap_or(true);
                if near_open != far_open {
                    let _ = seen.insert((coord, neighbour));
                }
            }
        }
    }
    seen.len()
}

fn cell_index(grid: &Grid, coord: GridCoordinate) -> usize {
    // Passages only ever join coordinates inside the grid.
    coord.row * grid.columns().0 + coord.column
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::carve_passage;
    use crate::units::{ColumnsCount, RowsCount};

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    fn gc(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    fn visit_all(g: &mut Grid) {
        for coord in g.iter() {
            g.mark_visited(coord).unwrap();
        }
    }

    #[test]
    fn closed_grid_is_all_separate_components() {
        let g = grid(3, 3);
        let report = MazeReport::examine(&g);
        assert_eq!(report.cells, 9);
        assert_eq!(report.visited, 0);
        assert_eq!(report.passages, 0);
        assert_eq!(report.components, 9);
        assert_eq!(report.largest_component, 1);
        assert_eq!(report.cycles, 0);
        assert!(!report.is_perfect());
    }

    #[test]
    fn single_visited_cell_is_perfect() {
        let mut g = grid(1, 1);
        visit_all(&mut g);
        assert!(MazeReport::examine(&g).is_perfect());
    }

    #[test]
    fn hand_carved_tree_is_perfect() {
        let mut g = grid(2, 2);
        carve_passage(&mut g, gc(0, 0), Direction::East).unwrap();
        carve_passage(&mut g, gc(0, 1), Direction::South).unwrap();
        carve_passage(&mut g, gc(1, 1), Direction::West).unwrap();
        visit_all(&mut g);

        let report = MazeReport::examine(&g);
        assert_eq!(report.passages, 3);
        assert_eq!(report.components, 1);
        assert_eq!(report.largest_component, 4);
        assert!(report.is_perfect());
    }

    #[test]
    fn loop_is_detected() {
        let mut g = grid(2, 2);
        carve_passage(&mut g, gc(0, 0), Direction::East).unwrap();
        carve_passage(&mut g, gc(0, 1), Direction::South).unwrap();
        carve_passage(&mut g, gc(1, 1), Direction::West).unwrap();
        carve_passage(&mut g, gc(1, 0), Direction::North).unwrap();
        visit_all(&mut g);

        let report = MazeReport::examine(&g);
        assert_eq!(report.passages, 4);
        assert_eq!(report.cycles, 1);
        assert_eq!(report.components, 1);
        assert!(!report.is_perfect());
    }

    #[test]
    fn disconnected_regions_are_detected() {
        let mut g = grid(2, 2);
        carve_passage(&mut g, gc(0, 0), Direction::East).unwrap();
        carve_passage(&mut g, gc(1, 0), Direction::East).unwrap();
        visit_all(&mut g);

        let report = MazeReport::examine(&g);
        assert_eq!(report.components, 2);
        assert_eq!(report.largest_component, 2);
        assert!(!report.is_perfect());
    }

    #[test]
    fn one_sided_openings_are_detected() {
        let mut g = grid(1, 3);
        carve_passage(&mut g, gc(0, 0), Direction::East).unwrap();
        g.remove_wall(gc(0, 2), Direction::West).unwrap();
        visit_all(&mut g);

        assert_eq!(one_sided_walls(&g), 1);
        let report = MazeReport::examine(&g);
        assert_eq!(report.one_sided_walls, 1);
        assert!(!report.is_perfect());
    }
}

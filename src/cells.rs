use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

pub const DIRECTIONS: [Direction; 4] = [Direction::North,
                                        Direction::South,
                                        Direction::East,
                                        Direction::West];

impl Direction {
    /// The direction pointing back across the same edge.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// One grid unit: a visited flag plus independent wall flags for each side.
/// `true` for a wall flag means the wall is present and the edge impassable.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub visited: bool,
    pub wall_north: bool,
    pub wall_south: bool,
    pub wall_east: bool,
    pub wall_west: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            visited: false,
            wall_north: true,
            wall_south: true,
            wall_east: true,
            wall_west: true,
        }
    }
}

impl Cell {
    #[inline]
    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.wall_north,
            Direction::South => self.wall_south,
            Direction::East => self.wall_east,
            Direction::West => self.wall_west,
        }
    }

    /// Walls are only ever knocked down, never rebuilt.
    #[inline]
    pub fn remove_wall(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.wall_north = false,
            Direction::South => self.wall_south = false,
            Direction::East => self.wall_east = false,
            Direction::West => self.wall_west = false,
        }
    }

    pub fn walls_count(&self) -> usize {
        DIRECTIONS.iter().filter(|dir| self.has_wall(**dir)).count()
    }
}

/// Supplies a direction on every call.
/// Generators take one of these as an explicit dependency rather than reaching for a global rng,
/// so that a seeded source gives a reproducible maze.
pub trait DirectionSource {
    fn next_direction(&mut self) -> Direction;
}

/// Uniformly random compass directions, each with probability 1/4, independent across calls.
#[derive(Debug, Clone)]
pub struct RandomDirections<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDirections<R> {
    pub fn new(rng: R) -> RandomDirections<R> {
        RandomDirections { rng }
    }
}

impl RandomDirections<XorShiftRng> {
    pub fn from_seed(seed: u64) -> RandomDirections<XorShiftRng> {
        RandomDirections::new(XorShiftRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> RandomDirections<XorShiftRng> {
        RandomDirections::new(XorShiftRng::from_entropy())
    }
}

impl<R: Rng> DirectionSource for RandomDirections<R> {
    fn next_direction(&mut self) -> Direction {
        DIRECTIONS[self.rng.gen_range(0..DIRECTIONS.len())]
    }
}

impl<'a, D: DirectionSource + ?Sized> DirectionSource for &'a mut D {
    fn next_direction(&mut self) -> Direction {
        (**self).next_direction()
    }
}

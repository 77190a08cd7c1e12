//! **maze-carver** carves perfect mazes over rectangular grids of walled cells.
//!
//! Build a `grid::Grid`, hand it to a `generators::MazeGenerator` such as
//! `generators::HuntAndKill` and read the wall flags back out once `generate` returns.

pub mod analysis;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod units;
mod utils;

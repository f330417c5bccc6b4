//! Extract the geometries from a multi-job Gaussian listing, where each job is
//! separated by a `--Link1--` line, and lay them out on a square grid for
//! plotting

pub mod atom;
pub mod grid;
pub mod molecule;
pub mod parse;

#[cfg(test)]
mod tests;

pub use atom::Atom;
pub use grid::{Grid, grid_side};
pub use molecule::{Molecule, MoleculeSet};
pub use parse::{BOUNDARY, Line, ParseError, parse};

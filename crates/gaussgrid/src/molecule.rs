use std::{fmt::Display, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Atom, Grid, ParseError, parse};

/// An ordered sequence of atoms from one segment of the input. The order is
/// the order the atom lines appeared in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
}

impl Display for Molecule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for atom in &self.atoms {
            writeln!(f, "{atom}")?;
        }
        Ok(())
    }
}

impl From<Vec<Atom>> for Molecule {
    fn from(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// the arithmetic mean of the atomic coordinates, or None for an empty
    /// molecule
    pub fn centroid(&self) -> Option<[f64; 3]> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let mut ret = [0.0; 3];
        for atom in &self.atoms {
            for (r, c) in ret.iter_mut().zip(atom.coord()) {
                *r += c;
            }
        }
        Some(ret.map(|r| r / n))
    }

    /// the (min, max) pair for each Cartesian axis, or None for an empty
    /// molecule
    pub fn bounds(&self) -> Option<[(f64, f64); 3]> {
        if self.is_empty() {
            return None;
        }
        let mut ret = [(f64::INFINITY, f64::NEG_INFINITY); 3];
        for atom in &self.atoms {
            for ((lo, hi), c) in ret.iter_mut().zip(atom.coord()) {
                *lo = lo.min(c);
                *hi = hi.max(c);
            }
        }
        Some(ret)
    }
}

impl<'a> IntoIterator for &'a Molecule {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

/// Every molecule parsed from one input stream, in input order. Construct one
/// with [parse], [MoleculeSet::load], or [str::parse]. There is no way to
/// modify the set after it has been built
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoleculeSet {
    molecules: Vec<Molecule>,
}

impl Display for MoleculeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, mol) in self.molecules.iter().enumerate() {
            writeln!(f, "Cluster {}", i + 1)?;
            write!(f, "{mol}")?;
        }
        Ok(())
    }
}

impl FromStr for MoleculeSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.lines())
    }
}

impl From<Vec<Molecule>> for MoleculeSet {
    fn from(molecules: Vec<Molecule>) -> Self {
        Self { molecules }
    }
}

impl MoleculeSet {
    /// read and parse the file at `path`. failing to read the file is reported
    /// as [ParseError::FileUnreadable]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ParseError::FileUnreadable {
                path: path.display().to_string(),
                kind: e.kind(),
            }
        })?;
        contents.parse()
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Molecule> {
        self.molecules.get(index)
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Molecule> {
        self.molecules.iter()
    }

    /// total number of atoms across every molecule
    pub fn atom_count(&self) -> usize {
        self.molecules.iter().map(Molecule::len).sum()
    }

    /// the square grid needed to show every molecule in the set
    pub fn grid(&self) -> Grid {
        Grid::new(self.len())
    }
}

impl<'a> IntoIterator for &'a MoleculeSet {
    type Item = &'a Molecule;
    type IntoIter = std::slice::Iter<'a, Molecule>;

    fn into_iter(self) -> Self::IntoIter {
        self.molecules.iter()
    }
}

use std::{error::Error, fmt::Display, sync::LazyLock};

use log::{debug, trace};
use regex::Regex;

use crate::{Atom, Molecule, MoleculeSet};

/// the literal separating one job's geometry from the next
pub const BOUNDARY: &str = "--Link1--";

/// an element label of one or two letters followed by three numeric fields.
/// the numeric fields only have to look like numbers here, they are checked
/// properly by the f64 parser afterwards
static ATOM: LazyLock<Regex> = LazyLock::new(|| {
    trace!("initializing atom line regex");
    Regex::new(
        r"^\s*([A-Za-z]{1,2})\s+([-0-9.]+)\s+([-0-9.]+)\s+([-0-9.]+)\s*$",
    )
    .unwrap()
});

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// the input file could not be read
    FileUnreadable {
        path: String,
        kind: std::io::ErrorKind,
    },

    /// a line shaped like an atom record contained a coordinate that is not a
    /// valid float. `line_number` starts at 1
    MalformedCoordinate { line_number: usize, line: String },
}

impl ParseError {
    /// Returns `true` if the parse error is [`MalformedCoordinate`].
    ///
    /// [`MalformedCoordinate`]: ParseError::MalformedCoordinate
    #[must_use]
    pub fn is_malformed_coordinate(&self) -> bool {
        matches!(self, Self::MalformedCoordinate { .. })
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::FileUnreadable { path, kind } => {
                write!(f, "failed to read {path}: {kind}")
            }
            ParseError::MalformedCoordinate { line_number, line } => {
                write!(
                    f,
                    "malformed coordinate on line {line_number}: `{}`",
                    line.trim_end()
                )
            }
        }
    }
}

impl Error for ParseError {}

/// The three kinds of line the parser cares about
#[derive(Debug, PartialEq)]
pub enum Line {
    Atom(Atom),
    Boundary,
    Other,
}

impl Line {
    /// classify a single line. the atom pattern is tried first, so a line can
    /// never be both an atom and a boundary. a boundary has to start in the
    /// first column. `line_number` is only used for error reporting
    pub fn classify(
        line: &str,
        line_number: usize,
    ) -> Result<Self, ParseError> {
        if let Some(caps) = ATOM.captures(line) {
            let mut coord = [0.0; 3];
            for (i, c) in coord.iter_mut().enumerate() {
                *c = caps[i + 2].parse().map_err(|_| {
                    ParseError::MalformedCoordinate {
                        line_number,
                        line: line.to_owned(),
                    }
                })?;
            }
            let [x, y, z] = coord;
            Ok(Line::Atom(Atom::new(&caps[1], x, y, z)))
        } else if line.starts_with(BOUNDARY) {
            Ok(Line::Boundary)
        } else {
            Ok(Line::Other)
        }
    }
}

/// Split `lines` into molecules on [BOUNDARY] lines.
///
/// Every boundary closes the molecule in progress and appends it to the result,
/// even if it has no atoms. At the end of the input, the molecule in progress
/// is only kept if it is not empty, so N boundaries with no atom lines give N
/// empty molecules, not N+1. Lines that are neither atoms nor boundaries are
/// skipped. The first coordinate that fails to parse as an f64 aborts the whole
/// parse.
pub fn parse<I>(lines: I) -> Result<MoleculeSet, ParseError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut molecules = Vec::new();
    let mut current = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        match Line::classify(line.as_ref(), i + 1)? {
            Line::Atom(atom) => current.push(atom),
            Line::Boundary => {
                trace!(
                    "closing molecule {} with {} atoms at line {}",
                    molecules.len() + 1,
                    current.len(),
                    i + 1
                );
                molecules.push(Molecule::new(std::mem::take(&mut current)));
            }
            Line::Other => {}
        }
    }
    if !current.is_empty() {
        molecules.push(Molecule::new(current));
    }

    let ret = MoleculeSet::from(molecules);
    debug!(
        "parsed {} molecules containing {} atoms",
        ret.len(),
        ret.atom_count()
    );
    Ok(ret)
}

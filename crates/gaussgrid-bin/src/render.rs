//! Draw a [MoleculeSet] as an SVG image with one square cell per molecule

use std::fmt::Display;

use clap::ValueEnum;
use gaussgrid::{Molecule, MoleculeSet};
use log::{debug, warn};

use crate::config::Config;

/// viewing angles for the 3d projection, in degrees
const AZIMUTH: f64 = -60.0;
const ELEVATION: f64 = 30.0;

/// fraction of the cell width left empty on each side of the atoms
const MARGIN: f64 = 0.15;

const FONT: &str = "DejaVu Sans, Arial, sans-serif";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Projection {
    /// flatten onto the XY plane
    #[value(name = "2d")]
    TwoD,

    /// equal-scaled orthographic view of all three axes
    #[default]
    #[value(name = "3d")]
    ThreeD,
}

impl Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Projection::TwoD => write!(f, "2d"),
            Projection::ThreeD => write!(f, "3d"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// the unit vectors in world space pointing right and up on the screen
fn view_axes() -> [[f64; 3]; 2] {
    let (az, el) = (AZIMUTH.to_radians(), ELEVATION.to_radians());
    [
        [-az.sin(), az.cos(), 0.0],
        [-az.cos() * el.sin(), -az.sin() * el.sin(), el.cos()],
    ]
}

/// map the XY coordinates of `mol` into a `cell` x `cell` box, scaling each
/// axis separately
fn project_2d(mol: &Molecule, cell: f64) -> Vec<Point> {
    let Some([(xlo, xhi), (ylo, yhi), _]) = mol.bounds() else {
        return Vec::new();
    };
    let pad = MARGIN * cell;
    let width = cell - 2.0 * pad;
    let frac = |v: f64, lo: f64, hi: f64| {
        if hi > lo { (v - lo) / (hi - lo) } else { 0.5 }
    };
    mol.iter()
        .map(|a| Point {
            x: pad + frac(a.x, xlo, xhi) * width,
            y: pad + (1.0 - frac(a.y, ylo, yhi)) * width,
        })
        .collect()
}

/// project `mol` into a `cell` x `cell` box with the same scale on every axis,
/// centered on the mean atomic position
fn project_3d(mol: &Molecule, cell: f64) -> Vec<Point> {
    let Some(center) = mol.centroid() else {
        return Vec::new();
    };
    let reach = mol
        .iter()
        .flat_map(|a| {
            let c = a.coord();
            [0, 1, 2].map(|i| (c[i] - center[i]).abs())
        })
        .fold(0.0, f64::max);
    let reach = if reach > 0.0 { reach } else { 1.0 };
    let [right, up] = view_axes();
    // every normalized coordinate is within the unit cube, whose projection
    // extends at most sqrt(3) from the center
    let scale = (0.5 - MARGIN) * cell / 3f64.sqrt();
    let mid = cell / 2.0;
    mol.iter()
        .map(|a| {
            let c = a.coord();
            let p = [0, 1, 2].map(|i| (c[i] - center[i]) / reach);
            Point {
                x: mid + dot(p, right) * scale,
                y: mid - dot(p, up) * scale,
            }
        })
        .collect()
}

pub fn escape_xml(s: &str) -> String {
    let mut ret = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => ret.push_str("&amp;"),
            '<' => ret.push_str("&lt;"),
            '>' => ret.push_str("&gt;"),
            '"' => ret.push_str("&quot;"),
            '\'' => ret.push_str("&apos;"),
            c => ret.push(c),
        }
    }
    ret
}

/// Draws every molecule of a set in its own cell of a square grid, in
/// row-major order, leaving any cells past the last molecule blank
pub struct Plot<'a> {
    config: &'a Config,
    projection: Projection,
}

impl<'a> Plot<'a> {
    pub fn new(config: &'a Config, projection: Projection) -> Self {
        Self { config, projection }
    }

    pub fn render(&self, mols: &MoleculeSet) -> String {
        let grid = mols.grid();
        let cell = self.config.cell_size;
        let size = grid.side() as f64 * cell;
        debug!(
            "drawing {} molecules on a {n}x{n} grid",
            grid.len(),
            n = grid.side()
        );

        let mut svg = format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{size}' \
	     height='{size}' viewBox='0 0 {size} {size}'>\n"
        );
        svg.push_str(&format!(
            "<rect width='100%' height='100%' fill='{}'/>\n",
            escape_xml(&self.config.background)
        ));
        for (row, col, item) in grid.cells() {
            let Some(i) = item else {
                continue;
            };
            svg.push_str(&format!(
                "<g transform='translate({:.2},{:.2})'>\n",
                col as f64 * cell,
                row as f64 * cell
            ));
            self.draw_cell(&mut svg, i, &mols.molecules()[i]);
            svg.push_str("</g>\n");
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn draw_cell(&self, svg: &mut String, index: usize, mol: &Molecule) {
        let Config {
            cell_size: cell,
            point_radius,
            font_size,
            line_color,
            point_color,
            label_color,
            ..
        } = self.config;

        svg.push_str(&format!(
            "<text x='{:.2}' y='{:.2}' font-family='{FONT}' font-size='{:.2}' \
	     text-anchor='middle'>Cluster {}</text>\n",
            cell / 2.0,
            font_size * 1.5,
            font_size * 1.25,
            index + 1
        ));
        self.draw_axes(svg);

        if mol.is_empty() {
            warn!("cluster {} contains no atoms", index + 1);
            return;
        }

        let points = match self.projection {
            Projection::TwoD => project_2d(mol, *cell),
            Projection::ThreeD => project_3d(mol, *cell),
        };

        // close the loop back to the first atom
        let path: Vec<_> = points
            .iter()
            .chain(points.first())
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        svg.push_str(&format!(
            "<polyline points='{}' fill='none' stroke='{}' stroke-width='1.5'/>\n",
            path.join(" "),
            escape_xml(line_color)
        ));

        for p in &points {
            svg.push_str(&format!(
                "<circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{}'/>\n",
                p.x,
                p.y,
                point_radius,
                escape_xml(point_color)
            ));
        }

        for (j, (atom, p)) in mol.iter().zip(&points).enumerate() {
            svg.push_str(&format!(
                "<text x='{:.2}' y='{:.2}' font-family='{FONT}' \
		 font-size='{:.2}' fill='{}'>{}</text>\n",
                p.x + point_radius,
                p.y - point_radius,
                font_size,
                escape_xml(label_color),
                escape_xml(&atom.label(j))
            ));
        }
    }

    /// axis captions for 2d and a small X/Y/Z triad in the corner for 3d
    fn draw_axes(&self, svg: &mut String) {
        let cell = self.config.cell_size;
        let font_size = self.config.font_size;
        let pad = MARGIN * cell;
        let caption = |svg: &mut String, x: f64, y: f64, label: &str| {
            svg.push_str(&format!(
                "<text x='{x:.2}' y='{y:.2}' font-family='{FONT}' \
		 font-size='{font_size:.2}' text-anchor='middle'>{label}</text>\n",
            ));
        };
        match self.projection {
            Projection::TwoD => {
                caption(svg, cell / 2.0, cell - pad / 3.0, "X");
                caption(svg, pad / 3.0, cell / 2.0, "Y");
            }
            Projection::ThreeD => {
                let [right, up] = view_axes();
                let origin = Point {
                    x: pad / 2.0,
                    y: cell - pad / 2.0,
                };
                let len = 0.4 * pad;
                for (label, axis) in [
                    ("X", [1.0, 0.0, 0.0]),
                    ("Y", [0.0, 1.0, 0.0]),
                    ("Z", [0.0, 0.0, 1.0]),
                ] {
                    let end = Point {
                        x: origin.x + dot(axis, right) * len,
                        y: origin.y - dot(axis, up) * len,
                    };
                    svg.push_str(&format!(
                        "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' \
			 stroke='#888888'/>\n",
                        origin.x, origin.y, end.x, end.y
                    ));
                    caption(svg, end.x, end.y, label);
                }
            }
        }
    }
}

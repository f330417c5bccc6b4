//! Configuration settings for drawing a grid of molecules

use std::{
    fmt::{Debug, Display},
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use serde::Deserialize;


#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// The file to write the rendered SVG image to. Defaults to output.svg in
    /// the current directory.
    output: Option<PathBuf>,

    /// The width and height in pixels of the square cell drawn for each
    /// molecule.
    cell_size: Option<f64>,

    /// The radius in pixels of the circle drawn at each atom.
    point_radius: Option<f64>,

    /// The font size in pixels for atom labels. Cell titles are drawn a
    /// quarter larger.
    font_size: Option<f64>,

    /// Any SVG color for the line connecting the atoms of a molecule.
    line_color: Option<String>,

    /// Any SVG color for the atom circles.
    point_color: Option<String>,

    /// Any SVG color for the atom labels.
    label_color: Option<String>,

    /// Any SVG color for the image background.
    background: Option<String>,
}

/// Construct a [Config] using [Config::load] on a TOML file or take the
/// [Default]
#[derive(Clone, Deserialize, PartialEq, Debug)]
#[serde(from = "RawConfig")]
pub struct Config {
    pub output: PathBuf,
    pub cell_size: f64,
    pub point_radius: f64,
    pub font_size: f64,
    pub line_color: String,
    pub point_color: String,
    pub label_color: String,
    pub background: String,
}

impl From<RawConfig> for Config {
    fn from(rc: RawConfig) -> Self {
        Self {
            output: rc.output.unwrap_or_else(|| PathBuf::from("output.svg")),
            cell_size: rc.cell_size.unwrap_or(500.0),
            point_radius: rc.point_radius.unwrap_or(6.0),
            font_size: rc.font_size.unwrap_or(12.0),
            line_color: rc.line_color.unwrap_or_else(|| "blue".into()),
            point_color: rc.point_color.unwrap_or_else(|| "red".into()),
            label_color: rc.label_color.unwrap_or_else(|| "green".into()),
            background: rc.background.unwrap_or_else(|| "white".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl Config {
    /// load a [Config] from the TOML file specified by `filename`. any field
    /// missing from the file takes its default value
    pub fn load<P>(filename: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path> + Debug,
    {
        let contents = read_to_string(&filename).with_context(|| {
            format!("failed to load config file {filename:?}")
        })?;
        let ret: Self = toml::from_str(&contents).with_context(|| {
            format!("failed to deserialize config file {filename:?}")
        })?;

        ret.validate()?;

        Ok(ret)
    }

    /// check that the sizes in `self` make any sense
    fn validate(&self) -> anyhow::Result<()> {
        for (name, v) in [
            ("cell_size", self.cell_size),
            ("point_radius", self.point_radius),
            ("font_size", self.font_size),
        ] {
            if !v.is_finite() || v <= 0.0 {
                bail!("{name} must be positive and finite, got {v}");
            }
        }
        Ok(())
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Config {
            output,
            cell_size,
            point_radius,
            font_size,
            line_color,
            point_color,
            label_color,
            background,
        } = self;
        write!(
            f,
            "Configuration Options:
output = {}
cell_size = {cell_size}
point_radius = {point_radius}
font_size = {font_size}
line_color = {line_color}
point_color = {point_color}
label_color = {label_color}
background = {background}
",
            output.display(),
        )
    }
}

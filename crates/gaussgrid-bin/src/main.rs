use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gaussgrid::MoleculeSet;
use log::{debug, info};

mod config;
mod render;

use config::Config;
use render::{Plot, Projection};

/// plot every geometry in a Gaussian file with --Link1-- separated jobs on a
/// square grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gaussian input or output file to read geometries from
    #[arg(value_parser)]
    infile: PathBuf,

    /// Draw each molecule projected onto the XY plane (2d) or in an
    /// equal-scaled 3d view (3d)
    #[arg(short, long, value_enum, default_value_t = Projection::ThreeD)]
    plot: Projection,

    /// Where to write the SVG image. Overrides the output set in the config
    /// file, which defaults to output.svg
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with drawing options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the parsed molecules as JSON and exit without drawing anything
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mols = MoleculeSet::load(&args.infile).with_context(|| {
        format!("failed to parse {}", args.infile.display())
    })?;
    info!(
        "read {} molecules with {} atoms from {}",
        mols.len(),
        mols.atom_count(),
        args.infile.display()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&mols)?);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(output) = args.output {
        config.output = output;
    }
    debug!("{config}");

    let svg = Plot::new(&config, args.plot).render(&mols);
    std::fs::write(&config.output, svg).with_context(|| {
        format!("failed to write {}", config.output.display())
    })?;
    info!("drew {} plot", args.plot);
    println!("{}", config.output.display());

    Ok(())
}

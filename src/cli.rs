use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// kgrid house price interpolation.
#[derive(Parser)]
#[command(
    name = "kgrid",
    version,
    about = "k-nearest-neighbour house price interpolation over a city grid"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Sample a synthetic reference dataset from the city model.
    Synthesize(SynthesizeArgs),
    /// Interpolate prices over the query grid from a reference dataset.
    Interpolate(InterpolateArgs),
}

/// Arguments for the `synthesize` subcommand.
#[derive(clap::Args)]
pub struct SynthesizeArgs {
    /// Path to TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override reference Parquet output path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override number of sampled points from config.
    #[arg(short, long)]
    pub n_samples: Option<usize>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `interpolate` subcommand.
#[derive(clap::Args)]
pub struct InterpolateArgs {
    /// Path to TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override reference Parquet input path from config.
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Override grid Parquet output path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override number of neighbours from config.
    #[arg(short)]
    pub k: Option<usize>,

    /// Override batch size from config.
    #[arg(short, long)]
    pub batch_size: Option<usize>,
}

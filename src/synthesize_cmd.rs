//! Synthesize command: sample a reference dataset from the city model.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use kgrid_city::{CityParams, load_city_params, sample_reference_points};
use kgrid_io::write_reference_points;

use crate::cli::SynthesizeArgs;
use crate::config::KgridConfig;
use crate::convert;

/// Sample reference points and write them to Parquet.
pub fn run(args: SynthesizeArgs) -> Result<()> {
    let _cmd = info_span!("synthesize").entered();

    let config = KgridConfig::load(args.config.as_deref())?;
    let output = args.output.unwrap_or_else(|| config.io.reference.clone());
    let n_samples = args.n_samples.unwrap_or(config.city.n_samples);
    let seed = args.seed.or(config.seed);
    let writer_cfg = convert::build_writer_config(&config.io)?;

    let params = match &config.city.definition {
        Some(path) => load_city_params(path)
            .with_context(|| format!("failed to load city definition: {}", path.display()))?,
        None => CityParams::default(),
    };

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    info!(
        n_samples,
        limit = config.city.limit,
        max_floor = config.city.max_floor,
        n_centers = params.high_end_centers.len(),
        "sampling reference points"
    );
    let reference = sample_reference_points(
        n_samples,
        config.city.limit,
        config.city.max_floor,
        &params,
        &mut rng,
    )
    .context("failed to sample reference points")?;

    write_reference_points(&output, &reference, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    info!(path = %output.display(), "synthesize complete");

    Ok(())
}

//! Interpolate command: estimate prices over the query grid.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use kgrid_io::{read_reference_points, write_price_grid};
use kgrid_pipeline::{Orchestrator, create_query_points};

use crate::cli::InterpolateArgs;
use crate::config::KgridConfig;
use crate::convert;

/// Load reference data, interpolate the grid, and write the result.
///
/// Nothing is written unless every batch succeeds.
pub fn run(args: InterpolateArgs) -> Result<()> {
    let _cmd = info_span!("interpolate").entered();

    let mut config = KgridConfig::load(args.config.as_deref())?;
    if let Some(k) = args.k {
        config.knn.k = k;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch.batch_size = batch_size;
    }
    let reference_path = args.reference.unwrap_or_else(|| config.io.reference.clone());
    let output = args.output.unwrap_or_else(|| config.io.output.clone());

    interpolate(&config, &reference_path, &output)
}

fn interpolate(config: &KgridConfig, reference_path: &Path, output: &Path) -> Result<()> {
    let grid_cfg = convert::build_grid_config(&config.grid)?;
    let pipeline_cfg = convert::build_pipeline_config(&config.knn, &config.batch)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;

    info!(path = %reference_path.display(), "reading reference data");
    let reference = read_reference_points(reference_path)
        .with_context(|| format!("failed to read Parquet: {}", reference_path.display()))?;

    let queries = create_query_points(&grid_cfg).context("failed to build query grid")?;
    info!(
        n_queries = queries.len(),
        n_references = reference.len(),
        "query grid built"
    );

    let orchestrator =
        Orchestrator::new(&pipeline_cfg).context("failed to start worker pool")?;
    let prices = orchestrator
        .interpolate(&queries, &reference)
        .context("interpolation failed")?;

    write_price_grid(output, &queries, &prices, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    info!(path = %output.display(), n_points = prices.len(), "interpolate complete");

    Ok(())
}

//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use kgrid_io::{Compression, WriterConfig};
use kgrid_pipeline::{GridConfig, PipelineConfig};

use crate::config::*;

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> Result<WriterConfig> {
    let cfg = WriterConfig::default()
        .with_compression(parse_compression(&io.compression)?)
        .with_row_group_size(io.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`GridConfig`] from the TOML grid configuration.
pub fn build_grid_config(grid: &GridToml) -> Result<GridConfig> {
    let cfg = GridConfig::new()
        .with_n_points(grid.n_points)
        .with_limit(grid.limit)
        .with_floor(grid.floor);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`PipelineConfig`] from the TOML neighbour and batch sections.
pub fn build_pipeline_config(knn: &KnnToml, batch: &BatchToml) -> Result<PipelineConfig> {
    let cfg = PipelineConfig::new()
        .with_k(knn.k)
        .with_batch_size(batch.batch_size)
        .with_n_workers(batch.n_workers);
    cfg.validate()?;
    Ok(cfg)
}

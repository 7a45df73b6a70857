use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level kgrid configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KgridConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Query grid settings.
    #[serde(default)]
    pub grid: GridToml,

    /// Neighbour search settings.
    #[serde(default)]
    pub knn: KnnToml,

    /// Batching and worker pool settings.
    #[serde(default)]
    pub batch: BatchToml,

    /// Synthetic city settings.
    #[serde(default)]
    pub city: CityToml,
}

impl KgridConfig {
    /// Reads a config file, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_reference")]
    pub reference: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            output: default_output(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_reference() -> PathBuf {
    PathBuf::from("data.parquet")
}
fn default_output() -> PathBuf {
    PathBuf::from("grid.parquet")
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    #[serde(default = "default_n_points")]
    pub n_points: usize,
    #[serde(default = "default_limit")]
    pub limit: f64,
    #[serde(default = "default_floor")]
    pub floor: f64,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            n_points: default_n_points(),
            limit: default_limit(),
            floor: default_floor(),
        }
    }
}

fn default_n_points() -> usize {
    10
}
fn default_limit() -> f64 {
    10.0
}
fn default_floor() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnnToml {
    #[serde(default = "default_k")]
    pub k: usize,
}

impl Default for KnnToml {
    fn default() -> Self {
        Self { k: default_k() }
    }
}

fn default_k() -> usize {
    kgrid_knn::DEFAULT_K
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchToml {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Worker threads; 0 uses one per available CPU.
    #[serde(default)]
    pub n_workers: usize,
}

impl Default for BatchToml {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            n_workers: 0,
        }
    }
}

fn default_batch_size() -> usize {
    1024
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CityToml {
    /// JSON city definition; the built-in city when absent.
    #[serde(default)]
    pub definition: Option<PathBuf>,
    #[serde(default = "default_n_samples")]
    pub n_samples: usize,
    #[serde(default = "default_limit")]
    pub limit: f64,
    #[serde(default = "default_max_floor")]
    pub max_floor: u32,
}

impl Default for CityToml {
    fn default() -> Self {
        Self {
            definition: None,
            n_samples: default_n_samples(),
            limit: default_limit(),
            max_floor: default_max_floor(),
        }
    }
}

fn default_n_samples() -> usize {
    10_000
}
fn default_max_floor() -> u32 {
    10
}

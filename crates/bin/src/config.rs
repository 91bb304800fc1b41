//! Scenario configuration.

use quadtree::{Boundary, QuadTreeConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tree: QuadTreeConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

impl Config {
    /// Load configuration from `path`, writing the defaults there if missing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }
}

/// Area covered by the root node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub center: [f32; 2],
    #[serde(default = "default_half_extent")]
    pub half_extent: [f32; 2],
}

impl WorldConfig {
    pub fn boundary(&self) -> Boundary {
        Boundary::new(self.center.into(), self.half_extent.into())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            half_extent: default_half_extent(),
        }
    }
}

fn default_half_extent() -> [f32; 2] {
    [7071.0, 7071.0]
}

/// Generated workload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioConfig {
    /// Uniformly scattered points.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Number of dense clusters added on top.
    #[serde(default = "default_clusters")]
    pub clusters: usize,
    /// Points per cluster.
    #[serde(default = "default_cluster_size")]
    pub cluster_size: usize,
    /// Scatter radius of each cluster. 0 stacks every point on one spot.
    #[serde(default = "default_cluster_radius")]
    pub cluster_radius: f32,
    /// Rectangle queries to run (radius queries use the same count).
    #[serde(default = "default_queries")]
    pub queries: usize,
    #[serde(default = "default_query_half_extent")]
    pub query_half_extent: f32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Compare every query against a linear scan.
    #[serde(default = "default_verify")]
    pub verify: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            points: default_points(),
            clusters: default_clusters(),
            cluster_size: default_cluster_size(),
            cluster_radius: default_cluster_radius(),
            queries: default_queries(),
            query_half_extent: default_query_half_extent(),
            seed: default_seed(),
            verify: default_verify(),
        }
    }
}

fn default_points() -> usize {
    20_000
}
fn default_clusters() -> usize {
    4
}
fn default_cluster_size() -> usize {
    500
}
fn default_cluster_radius() -> f32 {
    0.0
}
fn default_queries() -> usize {
    1_000
}
fn default_query_half_extent() -> f32 {
    250.0
}
fn default_seed() -> u64 {
    0x9e37_79b9
}
fn default_verify() -> bool {
    true
}

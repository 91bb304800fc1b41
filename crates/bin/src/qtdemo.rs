//! Qtdemo - builds a quadtree from a generated workload and checks its queries.

mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use glam::Vec2;
use quadtree::{Boundary, QtObject, QuadTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, ScenarioConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Qtdemo v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("qtdemo.toml"));
    let config = Config::load(&path).with_context(|| format!("loading {}", path.display()))?;
    info!("Loaded configuration");
    run(&config)
}

/// Build the tree, run the queries and optionally verify them.
fn run(config: &Config) -> anyhow::Result<()> {
    let world = config.world.boundary();
    info!("  World: {} x {} around {}", world.width(), world.height(), world.center);
    info!("  Capacity: {}, max depth: {}", config.tree.capacity, config.tree.max_depth);

    // Validates the world before any point is sampled from it.
    let mut tree = QuadTree::with_config(world, config.tree)?;

    let mut rng = StdRng::seed_from_u64(config.scenario.seed);
    let positions = generate(&mut rng, &world, &config.scenario);

    // Payloads are indices into `positions`; the tree never owns the points.
    let start = Instant::now();
    let mut rejected = 0usize;
    for (index, &position) in positions.iter().enumerate() {
        if !tree.insert(QtObject::new(index as u32, position))? {
            rejected += 1;
        }
    }
    let stats = tree.stats();
    info!(
        "Inserted {} points in {:?} ({} nodes, {} leaves, depth {})",
        tree.len(),
        start.elapsed(),
        stats.nodes,
        stats.leaves,
        stats.max_depth
    );
    if rejected > 0 {
        warn!("{} points fell outside the world and were dropped", rejected);
    }

    let scenario = &config.scenario;
    let regions: Vec<Boundary> = (0..scenario.queries)
        .map(|_| {
            let center = random_point(&mut rng, &world);
            Boundary::from_center(center, scenario.query_half_extent)
        })
        .collect();

    let start = Instant::now();
    let mut results = Vec::new();
    let mut found = 0usize;
    for region in &regions {
        results.clear();
        tree.query_into(region, &mut results);
        found += results.len();
    }
    info!("{} range queries returned {} objects in {:?}", regions.len(), found, start.elapsed());

    let start = Instant::now();
    let found: usize = regions
        .iter()
        .map(|region| tree.query_radius(region.center, scenario.query_half_extent).len())
        .sum();
    info!("{} radius queries returned {} objects in {:?}", regions.len(), found, start.elapsed());

    if scenario.verify {
        verify(&tree, &positions, &regions)?;
        info!("All queries match a linear scan");
    }

    tree.destroy();
    Ok(())
}

/// Uniform points over the world plus dense clusters.
fn generate(rng: &mut StdRng, world: &Boundary, scenario: &ScenarioConfig) -> Vec<Vec2> {
    let clustered = scenario.clusters * scenario.cluster_size;
    let mut positions = Vec::with_capacity(scenario.points + clustered);
    for _ in 0..scenario.points {
        positions.push(random_point(rng, world));
    }

    for _ in 0..scenario.clusters {
        let center = random_point(rng, world);
        debug!("Cluster of {} around {}", scenario.cluster_size, center);
        for _ in 0..scenario.cluster_size {
            let offset = if scenario.cluster_radius > 0.0 {
                let r = scenario.cluster_radius;
                Vec2::new(rng.random_range(-r..=r), rng.random_range(-r..=r))
            } else {
                Vec2::ZERO
            };
            positions.push(center + offset);
        }
    }
    positions
}

fn random_point(rng: &mut StdRng, world: &Boundary) -> Vec2 {
    let min = world.min();
    let max = world.max();
    Vec2::new(rng.random_range(min.x..=max.x), rng.random_range(min.y..=max.y))
}

/// Check every region against a brute-force scan of `positions`.
fn verify(tree: &QuadTree<u32>, positions: &[Vec2], regions: &[Boundary]) -> anyhow::Result<()> {
    let mut all: Vec<u32> = tree.query(tree.boundary()).iter().map(|o| o.payload).collect();
    all.sort_unstable();
    let expected: Vec<u32> = positions
        .iter()
        .enumerate()
        .filter(|(_, p)| tree.boundary().contains(**p))
        .map(|(i, _)| i as u32)
        .collect();
    if all != expected {
        bail!("full query returned {} objects, expected {}", all.len(), expected.len());
    }

    for region in regions {
        let mut got: Vec<u32> = tree.query(region).iter().map(|o| o.payload).collect();
        got.sort_unstable();
        let want: Vec<u32> = expected
            .iter()
            .copied()
            .filter(|&i| region.contains(positions[i as usize]))
            .collect();
        if got != want {
            bail!(
                "query around {} returned {} objects, expected {}",
                region.center,
                got.len(),
                want.len()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use quadtree::QuadTreeError;

    use super::*;
    use crate::config::WorldConfig;

    fn small(world: WorldConfig) -> Config {
        Config {
            world,
            scenario: ScenarioConfig {
                points: 300,
                clusters: 2,
                cluster_size: 40,
                queries: 50,
                query_half_extent: 20.0,
                ..ScenarioConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_run_small_scenario() {
        let world = WorldConfig {
            center: [0.9, -3.3],
            half_extent: [100.7, 60.1],
        };
        run(&small(world)).unwrap();
    }

    #[test]
    fn test_invalid_world_is_an_error() {
        for half_extent in [[-10.0, 10.0], [f32::NAN, 10.0]] {
            let world = WorldConfig {
                center: [0.0, 0.0],
                half_extent,
            };
            let err = run(&small(world)).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<QuadTreeError>(),
                Some(QuadTreeError::InvalidBoundary { .. })
            ));
        }
    }
}

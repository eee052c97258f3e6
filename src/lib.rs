//! # petri
//!
//! Grid-world neuroevolution sandbox built on a variable-length,
//! variable-topology genetic encoding.
//!
//! ## Features
//!
//! - **Evolvable**: genomes are ordered gene lists whose hidden layers
//!   grow as evolution references higher indices
//! - **Compiled**: each genome is compiled into an arena-based network
//!   with unreachable connections pruned away
//! - **Parallel**: per-tick agent thinking runs across all cores via Rayon
//! - **Reproducible**: seeded random number generation end to end
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust
//! use petri::{Config, World};
//!
//! let mut config = Config::default();
//! config.evolution.population = 40;
//! config.evolution.steps_per_generation = 100;
//!
//! let mut world = World::new_with_seed(config, 42).unwrap();
//! world.run(3);
//!
//! println!("accuracy: {:.1}%", world.accuracy * 100.0);
//! ```
//!
//! ## Core types
//!
//! [`genome::Genome`] carries the encoding and the crossover/mutation
//! operators; [`brain::Brain`] is its compiled, executable form. The
//! [`World`] is a thin consumer that wires brains to a grid map and
//! selects by final position.

pub mod agent;
pub mod brain;
pub mod config;
pub mod genome;
pub mod grid;
pub mod stats;
pub mod world;

// Re-export main types
pub use brain::Brain;
pub use config::Config;
pub use genome::{Gene, Genome, GenomeConfig};
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(generations: u32, population: usize) -> Result<BenchmarkResult, String> {
    use std::time::Instant;

    let mut config = Config::default();
    config.evolution.population = population;

    let mut world = World::new(config)?;

    let start = Instant::now();
    world.run(generations);
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        generations,
        population,
        final_accuracy: world.accuracy,
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: generations as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u32,
    pub population: usize,
    pub final_accuracy: f32,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Population: {}", self.population)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.2} generations/s", self.generations_per_second)?;
        writeln!(f, "Final accuracy: {:.1}%", self.final_accuracy * 100.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let mut config = Config::default();
        config.evolution.population = 20;
        config.evolution.steps_per_generation = 30;
        config.world.map_size = 30;
        config.world.obstacle_count = 5;
        config.genome.max_length = 80;

        let mut world = World::new_with_seed(config, 1).unwrap();
        world.run(2);

        assert_eq!(world.generation, 2);
    }
}

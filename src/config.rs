//! Configuration system for the petri simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub agents: AgentConfig,
    #[serde(default)]
    pub genome: GenomeSection,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// World/map configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Size of the square map
    pub map_size: u16,
    /// Number of obstacle cells scattered at creation
    pub obstacle_count: usize,
}

/// Agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Energy each agent starts a generation with; moving costs 1
    pub initial_energy: f32,
    /// Ring-scan radius for the surroundings sensors
    pub sense_radius: u16,
}

/// Genome topology bounds.
///
/// The input layer length is not configured; the world derives it from
/// the sense radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeSection {
    /// Number of hidden layers between input and output
    pub hidden_layer_count: usize,
    /// Output layer length (2 drives the x/y movement decision)
    pub output_layer_length: usize,
    /// Genes per genome
    pub max_length: usize,
    /// Allow sideways/backward connections
    pub allow_reverse_synapses: bool,
}

/// Evolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Agents per generation
    pub population: usize,
    /// Per-gene mutation probability during crossover
    pub mutation_rate: f32,
    /// Rightmost fraction of the map that counts as the survival zone
    pub survival_fraction: f32,
    /// Ticks per generation
    pub steps_per_generation: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Generations between stats log lines
    pub stats_interval: u32,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_size: 100,
            obstacle_count: 40,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_energy: 500.0,
            sense_radius: 3,
        }
    }
}

impl Default for GenomeSection {
    fn default() -> Self {
        Self {
            hidden_layer_count: 2,
            output_layer_length: 2,
            max_length: 400,
            allow_reverse_synapses: false,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population: 150,
            mutation_rate: 0.01,
            survival_fraction: 0.25,
            steps_per_generation: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.map_size == 0 {
            return Err("map_size must be > 0".to_string());
        }
        let cells = self.world.map_size as usize * self.world.map_size as usize;
        if self.world.obstacle_count + self.evolution.population > cells {
            return Err("map too small for obstacles plus population".to_string());
        }
        if self.agents.sense_radius == 0 {
            return Err("sense_radius must be > 0".to_string());
        }
        if self.genome.output_layer_length == 0 {
            return Err("output_layer_length must be > 0".to_string());
        }
        if self.evolution.population == 0 {
            return Err("population must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.evolution.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".to_string());
        }
        if !(self.evolution.survival_fraction > 0.0 && self.evolution.survival_fraction <= 1.0) {
            return Err("survival_fraction must be within (0, 1]".to_string());
        }
        if self.evolution.steps_per_generation == 0 {
            return Err("steps_per_generation must be > 0".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }
        Ok(())
    }
}

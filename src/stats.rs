//! Statistics tracking for the simulation.

use crate::agent::Agent;
use serde::{Deserialize, Serialize};

/// Statistics snapshot for one completed generation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (0-based)
    pub generation: u32,
    /// Agents that ran this generation
    pub population: usize,
    /// Agents that finished inside the survival zone
    pub survivors: usize,
    /// survivors / population
    pub accuracy: f32,
    /// Mean energy left at the end of the generation
    pub energy_mean: f32,
    /// Mean cells travelled per agent
    pub distance_mean: f32,
    /// Mean synapses that survived reachability pruning
    pub synapse_mean: f32,
    /// Mean genes discarded by pruning
    pub pruned_mean: f32,
}

impl GenerationStats {
    /// Collect stats from the agents of a finished generation.
    pub fn collect(generation: u32, agents: &[Agent], survivors: usize) -> Self {
        let population = agents.len();
        if population == 0 {
            return Self {
                generation,
                ..Self::default()
            };
        }

        let n = population as f32;
        Self {
            generation,
            population,
            survivors,
            accuracy: survivors as f32 / n,
            energy_mean: agents.iter().map(|a| a.energy).sum::<f32>() / n,
            distance_mean: agents.iter().map(|a| a.distance_travelled as f32).sum::<f32>() / n,
            synapse_mean: agents
                .iter()
                .map(|a| a.brain.synapse_count() as f32)
                .sum::<f32>()
                / n,
            pruned_mean: agents
                .iter()
                .map(|a| a.brain.pruned_genes() as f32)
                .sum::<f32>()
                / n,
        }
    }

    /// One-line summary for progress output
    pub fn summary(&self) -> String {
        format!(
            "gen {:>4} | pop {:>4} | survivors {:>4} ({:>5.1}%) | energy {:>6.1} | synapses {:>6.1} | pruned {:>6.1}",
            self.generation,
            self.population,
            self.survivors,
            self.accuracy * 100.0,
            self.energy_mean,
            self.synapse_mean,
            self.pruned_mean,
        )
    }
}

/// History of per-generation stats
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    pub records: Vec<GenerationStats>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stats: GenerationStats) {
        self.records.push(stats);
    }

    pub fn latest(&self) -> Option<&GenerationStats> {
        self.records.last()
    }

    /// Best accuracy seen so far
    pub fn best_accuracy(&self) -> f32 {
        self.records
            .iter()
            .map(|r| r.accuracy)
            .fold(0.0, f32::max)
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Genome, GenomeConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_agents(count: usize) -> Vec<Agent> {
        let config = GenomeConfig {
            input_layer_length: 10,
            hidden_layer_count: 1,
            output_layer_length: 2,
            max_length: 30,
            allow_reverse_synapses: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(103);
        (0..count)
            .map(|i| {
                let genome = Genome::create(config, &mut rng).unwrap();
                let mut agent = Agent::new(genome, i as u16, 0, 100.0);
                agent.energy = 10.0 * i as f32;
                agent
            })
            .collect()
    }

    #[test]
    fn test_collect_means() {
        let agents = test_agents(4);
        let stats = GenerationStats::collect(3, &agents, 1);

        assert_eq!(stats.generation, 3);
        assert_eq!(stats.population, 4);
        assert_eq!(stats.survivors, 1);
        assert!((stats.accuracy - 0.25).abs() < 1e-6);
        assert!((stats.energy_mean - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_collect_empty_population() {
        let stats = GenerationStats::collect(0, &[], 0);
        assert_eq!(stats.population, 0);
        assert_eq!(stats.accuracy, 0.0);
    }

    #[test]
    fn test_history_best_accuracy() {
        let mut history = StatsHistory::new();
        for (generation, accuracy) in [(0, 0.1), (1, 0.4), (2, 0.3)] {
            history.record(GenerationStats {
                generation,
                accuracy,
                ..GenerationStats::default()
            });
        }

        assert_eq!(history.records.len(), 3);
        assert!((history.best_accuracy() - 0.4).abs() < 1e-6);
        assert_eq!(history.latest().unwrap().generation, 2);
    }
}

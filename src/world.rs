//! World simulation engine - generation loop and selection.

use crate::agent::{input_length, ring_offsets, Agent};
use crate::config::Config;
use crate::genome::{Genome, GenomeConfig};
use crate::grid::{probe, Cell, Occupancy, Terrain};
use crate::stats::{GenerationStats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// The simulation world
pub struct World {
    // Population
    pub agents: Vec<Agent>,
    pub gene_pool: Vec<Genome>,

    // Environment
    pub terrain: Terrain,
    occupancy: Occupancy,

    // State
    pub generation: u32,
    pub accuracy: f32,

    // Configuration
    pub config: Config,
    genome_config: GenomeConfig,
    ring: Vec<(i32, i32)>,

    // Statistics
    pub stats: GenerationStats,
    pub stats_history: StatsHistory,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Create a new world with the given configuration
    pub fn new(config: Config) -> Result<Self, String> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility.
    ///
    /// All randomness flows through one seeded generator used only from
    /// the sequential phases, so equal seeds give equal runs even with
    /// the thinking phase parallelized.
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, String> {
        config.validate()?;

        let genome_config = GenomeConfig {
            input_layer_length: input_length(config.agents.sense_radius),
            hidden_layer_count: config.genome.hidden_layer_count,
            output_layer_length: config.genome.output_layer_length,
            max_length: config.genome.max_length,
            allow_reverse_synapses: config.genome.allow_reverse_synapses,
        };
        genome_config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map_size = config.world.map_size;

        let mut terrain = Terrain::new(map_size);
        terrain.scatter_obstacles(config.world.obstacle_count, &mut rng);

        Ok(Self {
            agents: Vec::with_capacity(config.evolution.population),
            gene_pool: Vec::with_capacity(config.evolution.population),
            terrain,
            occupancy: Occupancy::new(map_size),
            generation: 0,
            accuracy: 0.0,
            ring: ring_offsets(config.agents.sense_radius),
            genome_config,
            config,
            stats: GenerationStats::default(),
            stats_history: StatsHistory::new(),
            rng,
            seed,
        })
    }

    /// Run one full generation: spawn, simulate, select, rebuild the pool
    pub fn run_generation(&mut self) {
        self.spawn_agents();

        let steps = self.config.evolution.steps_per_generation;
        for step in 0..steps {
            self.tick(step, steps);
        }

        let survivors = self.select_survivors();
        self.accuracy = survivors.len() as f32 / self.config.evolution.population as f32;
        self.stats = GenerationStats::collect(self.generation, &self.agents, survivors.len());
        self.stats_history.record(self.stats.clone());

        if self.generation % self.config.logging.stats_interval == 0 {
            log::info!("{}", self.stats.summary());
        }

        self.rebuild_pool(survivors);
        self.generation += 1;
    }

    /// Run the given number of generations
    pub fn run(&mut self, generations: u32) {
        for _ in 0..generations {
            self.run_generation();
        }
    }

    /// Place one agent per pool genome on a clear cell
    fn spawn_agents(&mut self) {
        while self.gene_pool.len() < self.config.evolution.population {
            let genome = self.fresh_genome();
            self.gene_pool.push(genome);
        }

        self.agents.clear();
        self.occupancy.clear();

        for (idx, genome) in self.gene_pool.iter().enumerate() {
            let (x, y) = Self::find_clear_position(&self.terrain, &self.occupancy, &mut self.rng);
            self.occupancy.insert(x, y, idx);
            self.agents.push(Agent::new(
                genome.clone(),
                x,
                y,
                self.config.agents.initial_energy,
            ));
        }
    }

    fn fresh_genome(&mut self) -> Genome {
        Genome::create(self.genome_config, &mut self.rng)
            .expect("genome bounds validated at world construction")
    }

    fn find_clear_position(
        terrain: &Terrain,
        occupancy: &Occupancy,
        rng: &mut ChaCha8Rng,
    ) -> (u16, u16) {
        loop {
            let x = rng.gen_range(0..terrain.size());
            let y = rng.gen_range(0..terrain.size());
            if probe(terrain, occupancy, x as i32, y as i32) == Cell::Free {
                return (x, y);
            }
        }
    }

    /// One simulation tick.
    ///
    /// Phase 1 computes every active agent's movement decision in
    /// parallel (pure evaluation, no RNG, no shared mutable state);
    /// phase 2 applies moves sequentially so collisions resolve in a
    /// fixed order.
    fn tick(&mut self, step: u32, steps: u32) {
        let age_fraction = step as f32 / steps as f32;
        let terrain = &self.terrain;
        let occupancy = &self.occupancy;
        let ring = &self.ring;
        let initial_energy = self.config.agents.initial_energy;

        let decisions: Vec<(i32, i32)> = self
            .agents
            .par_iter_mut()
            .map(|agent| {
                if !agent.is_active() {
                    return (0, 0);
                }
                let inputs = agent.sense(terrain, occupancy, ring, age_fraction, initial_energy);
                let outputs = agent.think(&inputs);
                Agent::decide_step(&outputs)
            })
            .collect();

        for (idx, &(dx, dy)) in decisions.iter().enumerate() {
            self.apply_move(idx, dx, dy);
        }

        for agent in &mut self.agents {
            if agent.is_active() {
                agent.age += 1;
            }
        }
    }

    fn apply_move(&mut self, idx: usize, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let agent = &self.agents[idx];
        if !agent.is_active() {
            return;
        }

        let target_x = agent.x as i32 + dx;
        let target_y = agent.y as i32 + dy;
        if probe(&self.terrain, &self.occupancy, target_x, target_y) != Cell::Free {
            return;
        }

        let agent = &mut self.agents[idx];
        self.occupancy.remove(agent.x, agent.y);
        agent.x = target_x as u16;
        agent.y = target_y as u16;
        self.occupancy.insert(agent.x, agent.y, idx);
        agent.energy -= 1.0;
        agent.distance_travelled += 1;
    }

    /// Agents whose final x lies in the rightmost survival zone
    fn select_survivors(&self) -> Vec<usize> {
        let threshold =
            self.terrain.size() as f32 * (1.0 - self.config.evolution.survival_fraction);
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.x as f32 > threshold)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Next generation's pool: survivors' genomes plus crossover
    /// offspring until the population is restored.
    fn rebuild_pool(&mut self, survivors: Vec<usize>) {
        let population = self.config.evolution.population;
        let mutation_rate = self.config.evolution.mutation_rate;

        if survivors.is_empty() {
            // Nobody reached the zone; restart the pool from scratch
            // rather than breeding from nothing.
            log::warn!(
                "generation {}: no survivors, reseeding gene pool",
                self.generation
            );
            self.gene_pool.clear();
            while self.gene_pool.len() < population {
                let genome = self.fresh_genome();
                self.gene_pool.push(genome);
            }
            return;
        }

        let parents: Vec<Genome> = survivors
            .iter()
            .map(|&idx| self.agents[idx].genome.clone())
            .collect();

        let mut pool = parents.clone();
        let mut next_parent = 0;
        while pool.len() < population {
            let parent = &parents[next_parent % parents.len()];
            let partner = self.pick_partner(&parents, next_parent % parents.len());
            let offspring = Genome::crossover(parent, partner, mutation_rate, &mut self.rng);
            pool.push(offspring);
            next_parent += 1;
        }
        pool.truncate(population);
        self.gene_pool = pool;
    }

    /// Uniform partner among the other survivors; self only when alone
    fn pick_partner<'a>(&mut self, parents: &'a [Genome], parent_idx: usize) -> &'a Genome {
        if parents.len() == 1 {
            return &parents[0];
        }
        let mut partner_idx = self.rng.gen_range(0..parents.len() - 1);
        if partner_idx >= parent_idx {
            partner_idx += 1;
        }
        &parents[partner_idx]
    }

    /// Get current population count
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.evolution.population = 30;
        config.evolution.steps_per_generation = 50;
        config.world.map_size = 40;
        config.world.obstacle_count = 10;
        config.genome.max_length = 120;
        config
    }

    #[test]
    fn test_world_creation() {
        let world = World::new_with_seed(test_config(), 12345).unwrap();

        assert_eq!(world.generation, 0);
        assert_eq!(world.terrain.obstacle_count(), 10);
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut config = test_config();
        config.genome.output_layer_length = 0;

        assert!(World::new_with_seed(config, 1).is_err());
    }

    #[test]
    fn test_generation_cycle() {
        let config = test_config();
        let population = config.evolution.population;
        let mut world = World::new_with_seed(config, 42).unwrap();

        world.run_generation();

        assert_eq!(world.generation, 1);
        assert_eq!(world.population(), population);
        assert_eq!(world.gene_pool.len(), population);
        assert!((0.0..=1.0).contains(&world.accuracy));
    }

    #[test]
    fn test_agents_stay_in_bounds() {
        let config = test_config();
        let map_size = config.world.map_size;
        let mut world = World::new_with_seed(config, 7).unwrap();

        world.run_generation();

        for agent in &world.agents {
            assert!(agent.x < map_size);
            assert!(agent.y < map_size);
        }
    }

    #[test]
    fn test_agents_never_share_cells() {
        let mut world = World::new_with_seed(test_config(), 21).unwrap();
        world.run_generation();

        let mut positions: Vec<(u16, u16)> =
            world.agents.iter().map(|a| (a.x, a.y)).collect();
        positions.sort_unstable();
        positions.dedup();
        assert_eq!(positions.len(), world.agents.len());
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let config = test_config();
        let mut world1 = World::new_with_seed(config.clone(), 99).unwrap();
        let mut world2 = World::new_with_seed(config, 99).unwrap();

        world1.run(3);
        world2.run(3);

        assert_eq!(world1.accuracy, world2.accuracy);
        let positions1: Vec<(u16, u16)> = world1.agents.iter().map(|a| (a.x, a.y)).collect();
        let positions2: Vec<(u16, u16)> = world2.agents.iter().map(|a| (a.x, a.y)).collect();
        assert_eq!(positions1, positions2);
        assert_eq!(world1.gene_pool, world2.gene_pool);
    }

    #[test]
    fn test_pool_tracks_population_size() {
        let mut world = World::new_with_seed(test_config(), 3).unwrap();

        for _ in 0..3 {
            world.run_generation();
            assert_eq!(world.gene_pool.len(), world.config.evolution.population);
        }
    }
}

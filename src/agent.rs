//! Agent structure: a genome, its compiled brain, and map state.

use crate::brain::Brain;
use crate::genome::Genome;
use crate::grid::{probe, Occupancy, Terrain};

/// An agent in the grid world.
///
/// Each agent owns its genome and the brain compiled from it; nothing is
/// shared across agents, which is what makes the per-tick thinking phase
/// embarrassingly parallel.
#[derive(Clone, Debug)]
pub struct Agent {
    pub genome: Genome,
    pub brain: Brain,
    pub x: u16,
    pub y: u16,
    pub energy: f32,
    pub age: u32,
    pub distance_travelled: u32,
}

/// Ring-scan cell offsets: all cells at Chebyshev distance exactly
/// 1..=radius, in a fixed order so sensor positions stay stable across
/// ticks and generations.
pub fn ring_offsets(radius: u16) -> Vec<(i32, i32)> {
    let radius = radius as i32;
    let mut offsets = Vec::new();
    for r in 1..=radius {
        for dx in -r..=r {
            for dy in -r..=r {
                if dx.abs() == r || dy.abs() == r {
                    offsets.push((dx, dy));
                }
            }
        }
    }
    offsets
}

/// Number of brain inputs for a given sense radius: age fraction, energy
/// fraction, then one signal per ring cell (8r cells at radius r).
pub fn input_length(sense_radius: u16) -> usize {
    let r = sense_radius as usize;
    2 + 4 * r * (r + 1)
}

impl Agent {
    pub fn new(genome: Genome, x: u16, y: u16, energy: f32) -> Self {
        let brain = Brain::from_genome(&genome);
        Self {
            genome,
            brain,
            x,
            y,
            energy,
            age: 0,
            distance_travelled: 0,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.energy > 0.0
    }

    /// Build the brain input vector: own age and energy, then the
    /// surroundings encoded -1 (blocked) / 0 (free) / +1 (agent).
    pub fn sense(
        &self,
        terrain: &Terrain,
        occupancy: &Occupancy,
        offsets: &[(i32, i32)],
        age_fraction: f32,
        initial_energy: f32,
    ) -> Vec<f32> {
        let mut inputs = Vec::with_capacity(2 + offsets.len());
        inputs.push(age_fraction);
        inputs.push((self.energy / initial_energy).clamp(0.0, 1.0));

        for &(dx, dy) in offsets {
            let cell = probe(terrain, occupancy, self.x as i32 + dx, self.y as i32 + dy);
            inputs.push(cell.signal());
        }

        inputs
    }

    /// Run one forward pass over the sensed inputs.
    #[inline]
    pub fn think(&mut self, inputs: &[f32]) -> Vec<f32> {
        self.brain.evaluate(inputs)
    }

    /// Decode brain outputs into a movement step per axis: outputs past
    /// +0.5 step forward, past -0.5 step back, anything else holds.
    pub fn decide_step(outputs: &[f32]) -> (i32, i32) {
        let axis = |value: f32| {
            if value > 0.5 {
                1
            } else if value < -0.5 {
                -1
            } else {
                0
            }
        };
        let dx = axis(outputs.first().copied().unwrap_or(0.0));
        let dy = axis(outputs.get(1).copied().unwrap_or(0.0));
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Genome, GenomeConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_genome(input_len: usize) -> Genome {
        let config = GenomeConfig {
            input_layer_length: input_len,
            hidden_layer_count: 2,
            output_layer_length: 2,
            max_length: 120,
            allow_reverse_synapses: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(101);
        Genome::create(config, &mut rng).unwrap()
    }

    #[test]
    fn test_ring_offsets_counts() {
        assert_eq!(ring_offsets(1).len(), 8);
        assert_eq!(ring_offsets(2).len(), 8 + 16);
        assert_eq!(ring_offsets(3).len(), 8 + 16 + 24);
        assert_eq!(input_length(3), 2 + 48);
    }

    #[test]
    fn test_ring_offsets_are_shells() {
        for radius in 1..=4u16 {
            for (i, &(dx, dy)) in ring_offsets(radius).iter().enumerate() {
                let shell = dx.abs().max(dy.abs());
                assert!(shell >= 1 && shell <= radius as i32, "offset {} off-shell", i);
            }
        }
    }

    #[test]
    fn test_sense_vector_layout() {
        let input_len = input_length(2);
        let agent = Agent::new(test_genome(input_len), 5, 5, 100.0);
        let terrain = Terrain::new(11);
        let occupancy = Occupancy::new(11);
        let offsets = ring_offsets(2);

        let inputs = agent.sense(&terrain, &occupancy, &offsets, 0.25, 200.0);

        assert_eq!(inputs.len(), input_len);
        assert_eq!(inputs[0], 0.25);
        assert_eq!(inputs[1], 0.5);
        // Open map: every ring cell reads free.
        assert!(inputs[2..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_sense_reads_map_edge() {
        let input_len = input_length(1);
        let agent = Agent::new(test_genome(input_len), 0, 0, 50.0);
        let terrain = Terrain::new(11);
        let occupancy = Occupancy::new(11);
        let offsets = ring_offsets(1);

        let inputs = agent.sense(&terrain, &occupancy, &offsets, 0.0, 50.0);

        // Corner agent: the cells past the edge read blocked.
        assert!(inputs[2..].iter().any(|&s| s == -1.0));
    }

    #[test]
    fn test_decide_step_thresholds() {
        assert_eq!(Agent::decide_step(&[0.9, -0.9]), (1, -1));
        assert_eq!(Agent::decide_step(&[0.2, -0.4]), (0, 0));
        assert_eq!(Agent::decide_step(&[-0.6, 0.6]), (-1, 1));
        assert_eq!(Agent::decide_step(&[0.5, -0.5]), (0, 0));
        assert_eq!(Agent::decide_step(&[]), (0, 0));
    }

    #[test]
    fn test_think_produces_configured_outputs() {
        let input_len = input_length(3);
        let mut agent = Agent::new(test_genome(input_len), 5, 5, 100.0);
        let inputs = vec![0.1; input_len];

        let outputs = agent.think(&inputs);

        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|v| v.is_finite()));
    }
}

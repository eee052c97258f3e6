//! Genetic crossover between genomes.

use super::gene::Gene;
use super::genome::{Genome, GenomeConfig};
use rand::Rng;

impl Genome {
    /// Combine two parent genomes into an offspring.
    ///
    /// The offspring's bounds are the element-wise maximum of the parents'
    /// bounds (reverse synapses are allowed if either parent allows them),
    /// so every inherited gene stays addressable. Gene selection is
    /// positional: where both parents carry a gene, one is picked
    /// uniformly; past the shorter parent's end the longer parent's gene
    /// is taken as-is.
    ///
    /// Each selected gene is independently replaced by a mutated copy with
    /// probability `mutation_rate`. Replacement indices are drawn against
    /// the offspring's own gene set accumulated so far, since combining
    /// two genomes can change the effective shape.
    pub fn crossover(
        parent_a: &Genome,
        parent_b: &Genome,
        mutation_rate: f32,
        rng: &mut impl Rng,
    ) -> Genome {
        let config = GenomeConfig {
            input_layer_length: parent_a
                .config
                .input_layer_length
                .max(parent_b.config.input_layer_length),
            hidden_layer_count: parent_a
                .config
                .hidden_layer_count
                .max(parent_b.config.hidden_layer_count),
            output_layer_length: parent_a
                .config
                .output_layer_length
                .max(parent_b.config.output_layer_length),
            max_length: parent_a.config.max_length.max(parent_b.config.max_length),
            allow_reverse_synapses: parent_a.config.allow_reverse_synapses
                || parent_b.config.allow_reverse_synapses,
        };

        let length = parent_a.len().max(parent_b.len());
        let mut offspring = Genome {
            genes: Vec::with_capacity(length),
            config,
        };

        for i in 0..length {
            let gene = match (parent_a.genes.get(i), parent_b.genes.get(i)) {
                (Some(&a), Some(&b)) => {
                    if rng.gen_bool(0.5) {
                        a
                    } else {
                        b
                    }
                }
                (Some(&a), None) => a,
                (None, Some(&b)) => b,
                (None, None) => unreachable!("i < max(parent lengths)"),
            };

            let gene = if rng.gen::<f32>() < mutation_rate {
                offspring.mutate_gene(gene, rng)
            } else {
                gene
            };
            offspring.genes.push(gene);
        }

        offspring
    }
}

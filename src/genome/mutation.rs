//! Per-gene mutation operators.

use super::gene::Gene;
use super::genome::Genome;
use rand::Rng;

impl Genome {
    /// Produce a mutated copy of `gene`, drawing replacement fields within
    /// the ranges currently legal for this genome's gene set.
    ///
    /// Called on the offspring during crossover so that index bounds come
    /// from the offspring's own (possibly reshaped) topology, not from
    /// either parent's.
    pub fn mutate_gene(&self, gene: Gene, rng: &mut impl Rng) -> Gene {
        match rng.gen_range(0..4) {
            0 => self.reroll_weight(gene, rng),
            1 => self.reroll_source_index(gene, rng),
            2 => self.reroll_sink(gene, rng),
            _ => self.reroll_sink_index(gene, rng),
        }
    }

    /// Replace the weight with a fresh uniform draw from [-1, 1].
    fn reroll_weight(&self, gene: Gene, rng: &mut impl Rng) -> Gene {
        Gene {
            weight: rng.gen_range(-1.0..=1.0),
            ..gene
        }
    }

    /// Re-draw the source index within the source layer's current range.
    fn reroll_source_index(&self, gene: Gene, rng: &mut impl Rng) -> Gene {
        Gene {
            source_index: rng.gen_range(0..=self.max_node_index(gene.source_layer)),
            ..gene
        }
    }

    /// Re-draw the sink layer within the legal range for the gene's
    /// source, then the sink index within the new layer's range.
    fn reroll_sink(&self, gene: Gene, rng: &mut impl Rng) -> Gene {
        let sink_layer = self.random_sink_layer(gene.source_layer, rng);
        let sink_index = rng.gen_range(0..=self.max_node_index(sink_layer));
        Gene {
            sink_layer,
            sink_index,
            ..gene
        }
    }

    /// Re-draw only the sink index, keeping the sink layer.
    fn reroll_sink_index(&self, gene: Gene, rng: &mut impl Rng) -> Gene {
        Gene {
            sink_index: rng.gen_range(0..=self.max_node_index(gene.sink_layer)),
            ..gene
        }
    }
}

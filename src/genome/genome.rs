//! Genome: ordered gene list plus topology bounds, with shape inference
//! and random generation.

use super::gene::Gene;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Topology bounds for a genome.
///
/// Layer 0 is the input layer, layer `hidden_layer_count + 1` the output
/// layer. Hidden layer lengths are not configured; they grow organically
/// as genes reference higher indices (see [`Genome::shape`]).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenomeConfig {
    pub input_layer_length: usize,
    pub hidden_layer_count: usize,
    pub output_layer_length: usize,
    /// Number of genes drawn by [`Genome::create`]; also the offspring
    /// length bound during crossover.
    pub max_length: usize,
    /// When true, genes may run sideways or backwards
    /// (`source_layer >= sink_layer`); layer 0 still never receives.
    pub allow_reverse_synapses: bool,
}

impl GenomeConfig {
    /// Reject bounds that cannot describe a working network. Invalid
    /// bounds fail construction; they are never silently clamped.
    pub fn validate(&self) -> Result<(), String> {
        if self.input_layer_length == 0 {
            return Err("input_layer_length must be > 0".to_string());
        }
        if self.output_layer_length == 0 {
            return Err("output_layer_length must be > 0".to_string());
        }
        Ok(())
    }

    /// Index of the output layer.
    #[inline]
    pub fn last_layer(&self) -> usize {
        self.hidden_layer_count + 1
    }
}

/// An ordered collection of genes plus the bounds they were drawn under.
///
/// Gene order matters to crossover position semantics, not to evaluation.
/// Once a genome is handed to [`crate::brain::Brain::from_genome`] it is
/// treated as frozen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub genes: Vec<Gene>,
    pub config: GenomeConfig,
}

impl Genome {
    /// Generate a genome of `config.max_length` random genes.
    ///
    /// Bounds are re-derived from the genes drawn so far before every
    /// draw, so an index that grew a hidden layer becomes a valid target
    /// for the genes after it.
    pub fn create(config: GenomeConfig, rng: &mut impl Rng) -> Result<Self, String> {
        config.validate()?;

        let mut genome = Self {
            genes: Vec::with_capacity(config.max_length),
            config,
        };
        for _ in 0..config.max_length {
            let gene = genome.random_gene(rng);
            genome.genes.push(gene);
        }
        Ok(genome)
    }

    /// Per-layer neuron counts, derived from the gene list.
    ///
    /// Layer 0 and the output layer have configured lengths; a hidden
    /// layer is as long as its highest referenced index + 1, or 0 when no
    /// gene touches it.
    pub fn shape(&self) -> Vec<usize> {
        (0..=self.config.last_layer())
            .map(|layer| self.layer_len(layer))
            .collect()
    }

    /// Length of a single layer under the same rules as [`Genome::shape`].
    pub fn layer_len(&self, layer: usize) -> usize {
        if layer == 0 {
            return self.config.input_layer_length;
        }
        if layer == self.config.last_layer() {
            return self.config.output_layer_length;
        }

        self.genes
            .iter()
            .flat_map(|gene| {
                let source = (gene.source_layer == layer).then_some(gene.source_index);
                let sink = (gene.sink_layer == layer).then_some(gene.sink_index);
                source.into_iter().chain(sink)
            })
            .max()
            .map_or(0, |max_index| max_index + 1)
    }

    /// Highest index a draw may target in `layer`.
    ///
    /// Input and output layers are fixed: `len - 1`. For a hidden layer
    /// the range is `0..=shape[layer]`, so drawing the current length
    /// grows the layer by one, bounded by a cap derived from the
    /// input/output sizes so layers cannot grow without limit.
    pub fn max_node_index(&self, layer: usize) -> usize {
        if layer == 0 {
            return self.config.input_layer_length - 1;
        }
        if layer == self.config.last_layer() {
            return self.config.output_layer_length - 1;
        }

        self.layer_len(layer).min(self.hidden_index_cap(layer))
    }

    /// Growth bound for a hidden layer: deeper layers get smaller budgets,
    /// and no hidden layer is allowed to shrink below the output width.
    fn hidden_index_cap(&self, layer: usize) -> usize {
        let budget = self.config.input_layer_length + self.config.output_layer_length + 2;
        (self.config.output_layer_length + 1).max(budget.div_ceil(2 * (layer + 1)))
    }

    /// Draw one gene within the currently legal ranges.
    ///
    /// Layer 0 is never a sink. Without reverse synapses the source range
    /// excludes the output layer and the sink is drawn strictly after the
    /// source; with them, any layer may send and any non-input layer may
    /// receive.
    pub fn random_gene(&self, rng: &mut impl Rng) -> Gene {
        let last = self.config.last_layer();

        let source_layer = if self.config.allow_reverse_synapses {
            rng.gen_range(0..=last)
        } else {
            rng.gen_range(0..=self.config.hidden_layer_count)
        };
        let source_index = rng.gen_range(0..=self.max_node_index(source_layer));

        let sink_layer = self.random_sink_layer(source_layer, rng);
        let sink_index = rng.gen_range(0..=self.max_node_index(sink_layer));

        let weight = rng.gen_range(-1.0..=1.0);

        Gene::new(source_layer, source_index, sink_layer, sink_index, weight)
    }

    /// Draw a legal sink layer for a gene leaving `source_layer`.
    pub(crate) fn random_sink_layer(&self, source_layer: usize, rng: &mut impl Rng) -> usize {
        let last = self.config.last_layer();
        if self.config.allow_reverse_synapses {
            rng.gen_range(1..=last)
        } else {
            rng.gen_range(source_layer + 1..=last)
        }
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

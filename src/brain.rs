//! Compiled network: neuron arena, synapses, and the feed-forward pass.

use crate::genome::Genome;
use std::collections::HashSet;

/// One node of the compiled network.
///
/// `value` is the last computed activation; `accumulator` collects the
/// weighted sum in progress during a pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct Neuron {
    pub value: f32,
    pub accumulator: f32,
}

/// A compiled connection. Endpoints are slots in the owning brain's
/// neuron arena, not references, so the whole network can be dropped and
/// rebuilt atomically when the genome changes.
#[derive(Clone, Copy, Debug)]
pub struct Synapse {
    source: usize,
    sink: usize,
    weight: f32,
}

/// Executable form of a genome.
///
/// Neurons live in one flat arena; `offsets[layer]` is the arena slot of
/// `(layer, 0)`. Synapses are grouped by sink layer (gene order preserved
/// within each group) so a pass can finish accumulating into a layer
/// before activating it.
#[derive(Clone, Debug)]
pub struct Brain {
    shape: Vec<usize>,
    offsets: Vec<usize>,
    neurons: Vec<Neuron>,
    /// `incoming[layer]` holds the synapses sinking into that layer;
    /// index 0 is always empty.
    incoming: Vec<Vec<Synapse>>,
    /// Per arena slot: true when no retained synapse feeds the neuron.
    bias: Vec<bool>,
    pruned_genes: usize,
}

impl Brain {
    /// Compile a genome into an executable network.
    ///
    /// Genes whose signal cannot reach the output layer are pruned; a
    /// gene endpoint outside the genome's own derived shape is a defect
    /// in generation or mutation and panics.
    pub fn from_genome(genome: &Genome) -> Self {
        let shape = genome.shape();
        let last = shape.len() - 1;

        let mut offsets = Vec::with_capacity(shape.len());
        let mut total = 0;
        for &len in &shape {
            offsets.push(total);
            total += len;
        }

        for gene in &genome.genes {
            assert!(
                gene.source_layer < shape.len() && gene.source_index < shape[gene.source_layer],
                "gene source {:?} outside shape {:?}",
                gene.source(),
                shape
            );
            assert!(
                gene.sink_layer >= 1
                    && gene.sink_layer < shape.len()
                    && gene.sink_index < shape[gene.sink_layer],
                "gene sink {:?} outside shape {:?}",
                gene.sink(),
                shape
            );
        }

        // Reachability: a position is active when some gene chain leads
        // from it to the output layer. Scan to a fixed point; each pass
        // only ever adds positions, so this terminates.
        let mut active: HashSet<(usize, usize)> =
            (0..shape[last]).map(|index| (last, index)).collect();
        let mut changed = true;
        while changed {
            changed = false;
            for gene in &genome.genes {
                if active.contains(&gene.sink()) && !active.contains(&gene.source()) {
                    active.insert(gene.source());
                    changed = true;
                }
            }
        }

        let mut incoming: Vec<Vec<Synapse>> = vec![Vec::new(); shape.len()];
        let mut bias = vec![true; total];
        let mut retained = 0;
        for gene in &genome.genes {
            if !(active.contains(&gene.source()) && active.contains(&gene.sink())) {
                continue;
            }
            let sink = offsets[gene.sink_layer] + gene.sink_index;
            incoming[gene.sink_layer].push(Synapse {
                source: offsets[gene.source_layer] + gene.source_index,
                sink,
                weight: gene.weight,
            });
            bias[sink] = false;
            retained += 1;
        }

        let mut brain = Self {
            shape,
            offsets,
            neurons: vec![Neuron::default(); total],
            incoming,
            bias,
            pruned_genes: genome.len() - retained,
        };
        brain.reset();
        brain
    }

    /// Clear all carried state: bias neurons to 1, everything else to 0.
    pub fn reset(&mut self) {
        for (slot, neuron) in self.neurons.iter_mut().enumerate() {
            neuron.value = if self.bias[slot] { 1.0 } else { 0.0 };
            neuron.accumulator = 0.0;
        }
    }

    /// Run one deterministic forward pass.
    ///
    /// Input elements beyond the input layer's length are ignored, and
    /// non-finite elements are read as 0. Each layer's accumulation
    /// completes before the layer activates, so synapse order within a
    /// layer cannot affect the result. Bias neurons outside the output
    /// layer hold their constant 1; every other non-input neuron (and
    /// every output neuron) takes `tanh(accumulator)`.
    pub fn evaluate(&mut self, input: &[f32]) -> Vec<f32> {
        let input_len = self.shape[0];
        for (i, &x) in input.iter().take(input_len).enumerate() {
            self.neurons[i].value = if x.is_finite() { x } else { 0.0 };
        }

        for neuron in &mut self.neurons[self.offsets[1]..] {
            neuron.accumulator = 0.0;
        }

        let last = self.shape.len() - 1;
        for layer in 1..=last {
            for synapse in &self.incoming[layer] {
                let signal = self.neurons[synapse.source].value;
                self.neurons[synapse.sink].accumulator += signal * synapse.weight;
            }

            let start = self.offsets[layer];
            for slot in start..start + self.shape[layer] {
                if layer == last || !self.bias[slot] {
                    self.neurons[slot].value = self.neurons[slot].accumulator.tanh();
                }
            }
        }

        let start = self.offsets[last];
        self.neurons[start..].iter().map(|n| n.value).collect()
    }

    /// Per-layer neuron counts the brain was compiled for.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of synapses that survived reachability pruning.
    pub fn synapse_count(&self) -> usize {
        self.incoming.iter().map(Vec::len).sum()
    }

    /// Number of genes discarded because no path led to the output layer.
    pub fn pruned_genes(&self) -> usize {
        self.pruned_genes
    }

    /// Whether the neuron at `(layer, index)` has no incoming synapse.
    pub fn is_bias(&self, layer: usize, index: usize) -> bool {
        self.bias[self.offsets[layer] + index]
    }
}

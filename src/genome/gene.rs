//! Gene: one candidate connection in the layered topology.

use serde::{Deserialize, Serialize};

/// A directed, weighted connection between two network positions.
///
/// Positions are `(layer, index)` pairs into the genome's derived shape.
/// Genes are plain value objects; two genes are equal when all five fields
/// match. A gene is never modified in place once it sits in a genome —
/// mutation builds a replacement gene instead.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    pub source_layer: usize,
    pub source_index: usize,
    /// Always >= 1; layer 0 can never be a sink.
    pub sink_layer: usize,
    pub sink_index: usize,
    /// Kept within [-1, 1] by generation and mutation.
    pub weight: f32,
}

impl Gene {
    pub fn new(
        source_layer: usize,
        source_index: usize,
        sink_layer: usize,
        sink_index: usize,
        weight: f32,
    ) -> Self {
        Self {
            source_layer,
            source_index,
            sink_layer,
            sink_index,
            weight,
        }
    }

    /// Source position as a `(layer, index)` key.
    #[inline]
    pub fn source(&self) -> (usize, usize) {
        (self.source_layer, self.source_index)
    }

    /// Sink position as a `(layer, index)` key.
    #[inline]
    pub fn sink(&self) -> (usize, usize) {
        (self.sink_layer, self.sink_index)
    }
}

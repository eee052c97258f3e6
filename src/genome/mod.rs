//! Variable-length, variable-topology genetic encoding.
//!
//! A [`Genome`] is an ordered list of [`Gene`]s plus the topology bounds
//! they were drawn under. The per-layer neuron counts are not stored:
//! they are re-derived from the genes on demand, which is what lets
//! hidden layers grow as evolution references higher indices.

pub mod crossover;
pub mod gene;
pub mod genome;
pub mod mutation;

pub use gene::Gene;
pub use genome::{Genome, GenomeConfig};

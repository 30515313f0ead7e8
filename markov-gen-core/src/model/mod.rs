//! Top-level module for the Markov chain generation system.
//!
//! This module provides:
//! - A mutable frequency accumulator (`Trainer`)
//! - An immutable, normalized model (`Model`)
//! - Weighted states and successor symbols (`State`, `Symbol`)
//! - The random source abstraction used by generation (`RandomSource`)
//! - Generation settings (`PredictionInput`)

/// Frequency accumulator fed with observation strings.
///
/// Slides a fixed-width window across each observation, counts starting
/// keys and context transitions, and builds `Model`s from those counts.
pub mod trainer;

/// Immutable normalized model.
///
/// Holds the start distribution and the transition table, and generates
/// strings by weighted random walk.
pub mod markov_model;

/// Weighted states, successor symbols, normalization and weighted sampling.
pub mod state;

/// Sources of uniform random values in `[0, 1)`.
pub mod source;

/// Generation settings (retry budget, length cap).
pub mod prediction_input;

/// Raw observation counts keyed by value.
///
/// Internal to the trainer.
mod occurrences;

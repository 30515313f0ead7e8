//! Character-level Markov chain text generation library.
//!
//! This crate learns n-gram transition frequencies from short strings
//! (names, words) and synthesizes new strings that look like them:
//! - Frequency accumulation over a fixed-width context window (`Trainer`)
//! - Immutable, normalized models built from a trainer (`Model`)
//! - Weighted random walks driven by a caller-supplied random source
//!
//! The trainer is a single-writer accumulator. A built model is deeply
//! immutable and can be shared between threads freely.

/// Training, normalization and generation.
///
/// Exposes the trainer, the built model and the random source abstraction.
pub mod model;

/// Crate error type.
pub mod error;

use std::collections::HashMap;
use std::hash::Hash;

use super::state::{normalize, State};

/// Observation counts for one distribution (start keys, or the successors
/// of a single context).
///
/// ## Responsibilities:
/// - Accumulate occurrences during training
/// - Merge with counts gathered by another trainer
/// - Produce the normalized, ordered states of the distribution
///
/// ## Invariants
/// - Every stored count is strictly positive
#[derive(Clone, Debug)]
pub(crate) struct Occurrences<T: Hash + Eq> {
	counts: HashMap<T, u64>,
}

impl<T: Hash + Eq + Ord + Clone> Occurrences<T> {
	/// Creates an empty set of counts.
	pub fn new() -> Self {
		Self { counts: HashMap::new() }
	}

	/// Records one occurrence of `value`.
	pub fn add(&mut self, value: T) {
		*self.counts.entry(value).or_insert(0) += 1;
	}

	/// Total number of recorded occurrences.
	pub fn total(&self) -> u64 {
		self.counts.values().sum()
	}

	/// Number of distinct values seen.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	/// Adds the counts of `other` into this one.
	pub fn merge(&mut self, other: &Self) {
		for (value, occurrence) in &other.counts {
			*self.counts.entry(value.clone()).or_insert(0) += *occurrence;
		}
	}

	/// Normalized distribution, ordered by value.
	pub fn to_states(&self) -> Vec<State<T>> {
		normalize(&self.counts)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_accumulates_repeats() {
		let mut occurrences = Occurrences::new();
		occurrences.add('a');
		occurrences.add('a');
		occurrences.add('b');
		assert_eq!(occurrences.total(), 3);
		assert_eq!(occurrences.len(), 2);
	}

	#[test]
	fn merge_sums_shared_values() {
		let mut left = Occurrences::new();
		left.add("ab".to_owned());
		let mut right = Occurrences::new();
		right.add("ab".to_owned());
		right.add("cd".to_owned());

		left.merge(&right);

		let states = left.to_states();
		assert_eq!(states.len(), 2);
		assert_eq!(states[0].value(), "ab");
		assert!((states[0].weight() - 2.0 / 3.0).abs() < 1e-12);
		assert_eq!(states[1].value(), "cd");
	}
}

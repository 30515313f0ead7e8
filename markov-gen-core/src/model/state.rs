use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::source::RandomSource;

/// A successor observed right after a context.
///
/// `End` marks the end of an observation. It orders before every
/// character so distributions enumerate it first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
	/// End of sequence.
	End,
	/// A single character unit.
	Char(char),
}

impl Symbol {
	/// Returns the character carried by this symbol, if any.
	pub fn as_char(&self) -> Option<char> {
		match self {
			Symbol::Char(c) => Some(*c),
			Symbol::End => None,
		}
	}
}

/// A value paired with its probability weight.
///
/// A distribution is an ordered slice of states whose weights sum to 1.0
/// (within floating tolerance). Weights are always in `(0, 1]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct State<T> {
	value: T,
	weight: f64,
}

impl<T> State<T> {
	pub(crate) fn new(value: T, weight: f64) -> Self {
		Self { value, weight }
	}

	/// The weighted value.
	pub fn value(&self) -> &T {
		&self.value
	}

	/// Probability of drawing this value from its distribution.
	pub fn weight(&self) -> f64 {
		self.weight
	}
}

/// Converts raw counts into a normalized distribution.
///
/// Each weight is `count / total`. States are sorted by value so the same
/// counts always enumerate in the same order, whatever the map's iteration
/// order was. Zero counts are dropped; all-zero input yields no states.
pub(crate) fn normalize<T: Hash + Eq + Ord + Clone>(counts: &HashMap<T, u64>) -> Vec<State<T>> {
	let total: u64 = counts.values().sum();
	if total == 0 {
		return Vec::new();
	}
	let total = total as f64;

	let mut states: Vec<State<T>> = counts
		.iter()
		.filter(|(_, count)| **count > 0)
		.map(|(value, count)| State { value: value.clone(), weight: *count as f64 / total })
		.collect();

	states.sort_by(|a, b| a.value.cmp(&b.value));
	states
}

/// Draws one value from a distribution.
///
/// Consumes exactly one draw `r` from `source`, then walks the states in
/// order, subtracting each weight from `r`, and returns the first value
/// that brings it to `<= 0`.
///
/// Returns `None` when the states are empty, or when rounding left the
/// cumulative weight just under `r`. Callers treat `None` as end of sequence.
pub(crate) fn pick<'a, T, S>(states: &'a [State<T>], source: &mut S) -> Option<&'a T>
where
	S: RandomSource + ?Sized,
{
	let mut r = source.next_unit();
	for state in states {
		r -= state.weight;
		if r <= 0.0 {
			return Some(&state.value);
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::source::ReplaySource;

	fn states(pairs: &[(char, f64)]) -> Vec<State<Symbol>> {
		pairs.iter().map(|(c, w)| State { value: Symbol::Char(*c), weight: *w }).collect()
	}

	#[test]
	fn normalize_sorts_and_sums_to_one() {
		let counts: HashMap<Symbol, u64> =
			[(Symbol::Char('c'), 1), (Symbol::End, 2), (Symbol::Char('b'), 1)].into_iter().collect();

		let states = normalize(&counts);

		let values: Vec<Symbol> = states.iter().map(|s| *s.value()).collect();
		assert_eq!(values, vec![Symbol::End, Symbol::Char('b'), Symbol::Char('c')]);
		assert_eq!(states[0].weight(), 0.5);
		assert_eq!(states[1].weight(), 0.25);
		let sum: f64 = states.iter().map(State::weight).sum();
		assert!((sum - 1.0).abs() < 1e-9);
	}

	#[test]
	fn normalize_empty_counts() {
		let counts: HashMap<String, u64> = HashMap::new();
		assert!(normalize(&counts).is_empty());
	}

	#[test]
	fn pick_zero_draw_selects_first() {
		let states = states(&[('a', 0.5), ('b', 0.5)]);
		let mut source = ReplaySource::new(vec![0.0]);
		assert_eq!(pick(&states, &mut source), Some(&Symbol::Char('a')));
	}

	#[test]
	fn pick_boundary_belongs_to_lower_state() {
		let states = states(&[('a', 0.5), ('b', 0.5)]);
		let mut source = ReplaySource::new(vec![0.5, 0.75]);
		assert_eq!(pick(&states, &mut source), Some(&Symbol::Char('a')));
		assert_eq!(pick(&states, &mut source), Some(&Symbol::Char('b')));
	}

	#[test]
	fn pick_falls_back_when_weights_fall_short() {
		let states = states(&[('a', 0.3), ('b', 0.3)]);
		let mut source = ReplaySource::new(vec![0.9]);
		assert_eq!(pick(&states, &mut source), None);
	}

	#[test]
	fn pick_empty_distribution() {
		let states: Vec<State<Symbol>> = Vec::new();
		let mut source = ReplaySource::new(vec![0.1]);
		assert_eq!(pick(&states, &mut source), None);
	}

	#[test]
	fn end_orders_before_characters() {
		assert!(Symbol::End < Symbol::Char('\0'));
		assert_eq!(Symbol::End.as_char(), None);
		assert_eq!(Symbol::Char('x').as_char(), Some('x'));
	}
}

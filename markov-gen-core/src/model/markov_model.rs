use std::collections::{BTreeMap, HashSet};

use log::trace;
use serde::{Deserialize, Serialize};

use super::prediction_input::PredictionInput;
use super::source::RandomSource;
use super::state::{pick, State, Symbol};

/// Immutable Markov chain over character windows.
///
/// Built by `Trainer::build`. The model owns all of its data and is never
/// mutated after construction, so it can be shared and read from any
/// number of threads while each caller supplies its own random source.
///
/// # Invariants
/// - Every distribution is sorted by value and sums to 1.0
/// - Every starting key of length >= `order` is a context in `transitions`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Model {
	/// Width of the context window, in characters
	order: usize,

	/// Distribution over the keys a generated string can start with
	start: Vec<State<String>>,

	/// Context key -> distribution over its successors
	transitions: BTreeMap<String, Vec<State<Symbol>>>,

	/// Lowercased training observations
	observations: HashSet<String>,
}

impl Model {
	pub(crate) fn new(
		order: usize,
		start: Vec<State<String>>,
		transitions: BTreeMap<String, Vec<State<Symbol>>>,
		observations: HashSet<String>,
	) -> Self {
		Self { order, start, transitions, observations }
	}

	/// Width of the context window.
	pub fn order(&self) -> usize {
		self.order
	}

	/// The start distribution, sorted by key.
	pub fn start_states(&self) -> &[State<String>] {
		&self.start
	}

	/// The successor distribution of `context`, sorted by symbol.
	///
	/// Returns `None` for a context never observed.
	pub fn successors(&self, context: &str) -> Option<&[State<Symbol>]> {
		self.transitions.get(context).map(Vec::as_slice)
	}

	/// Every observed context, in ascending order.
	pub fn contexts(&self) -> impl Iterator<Item = &str> {
		self.transitions.keys().map(String::as_str)
	}

	/// Returns `true` if the model was built before anything was taught.
	pub fn is_empty(&self) -> bool {
		self.start.is_empty()
	}

	/// Returns `true` if `word` was one of the training observations.
	///
	/// The comparison is case-insensitive.
	pub fn is_known(&self, word: &str) -> bool {
		self.observations.contains(&word.to_lowercase())
	}

	/// Generates one string by weighted random walk.
	///
	/// Draws a starting key, then repeatedly looks up the trailing `order`
	/// characters and draws their successor until end of sequence. The walk
	/// also stops when the output is shorter than `order` (a short learned
	/// observation is returned as-is) or when the trailing window was never
	/// observed.
	///
	/// An untaught model always returns an empty string. Identical sources
	/// always produce identical strings.
	pub fn generate<S>(&self, source: &mut S) -> String
	where
		S: RandomSource + ?Sized,
	{
		self.walk(None, source)
	}

	/// Generates a string using the settings of `input`.
	///
	/// While the result is one of the training observations, generation is
	/// retried up to `input.nb_try` more times. The last attempt is
	/// returned if every attempt was already known.
	pub fn predict<S>(&self, input: &PredictionInput, source: &mut S) -> String
	where
		S: RandomSource + ?Sized,
	{
		let mut word = self.walk(input.max_length(), source);
		let mut nb_try = input.nb_try;

		while nb_try > 0 && self.is_known(&word) {
			word = self.walk(input.max_length(), source);
			nb_try -= 1;
		}

		word
	}

	fn walk<S>(&self, max_length: Option<usize>, source: &mut S) -> String
	where
		S: RandomSource + ?Sized,
	{
		let mut output = match pick(&self.start, source) {
			Some(key) => key.clone(),
			None => {
				trace!("no starting key drawn");
				return String::new();
			}
		};
		let mut length = output.chars().count();

		loop {
			if let Some(max) = max_length.filter(|max| length >= *max) {
				return output.chars().take(max).collect();
			}
			if length < self.order {
				return output;
			}

			let context = Self::last_n_chars(&output, self.order);
			let Some(successors) = self.transitions.get(context) else {
				trace!("unseen context {context:?}");
				return output;
			};

			match pick(successors, source) {
				Some(Symbol::Char(c)) => {
					output.push(*c);
					length += 1;
				}
				Some(Symbol::End) => return output,
				None => {
					trace!("sampling fell short after {context:?}");
					return output;
				}
			}
		}
	}

	/// Returns the last `n` characters of `s`, or all of `s` if it is shorter.
	fn last_n_chars(s: &str, n: usize) -> &str {
		let Some(back) = n.checked_sub(1) else {
			return &s[s.len()..];
		};
		match s.char_indices().rev().nth(back) {
			Some((at, _)) => &s[at..],
			None => s,
		}
	}
}

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::mpsc;
use std::thread;

use log::debug;

use crate::error::{Error, Result};
use super::markov_model::Model;
use super::occurrences::Occurrences;
use super::state::Symbol;

/// Number of chunks per CPU used by `Trainer::teach_parallel`.
const CHUNK_FACTOR: usize = 8;

/// Accumulates n-gram frequencies from observation strings.
///
/// A window of `order` characters slides across each (lowercased)
/// observation. The first window of an observation is counted as a
/// starting key, and each window is counted as a context followed by the
/// next character, or by `Symbol::End` at the end of the observation.
/// Observations no longer than `order` are kept whole: the observation is
/// both its starting key and a context leading to `Symbol::End`.
///
/// # Responsibilities
/// - Count starting keys and context transitions
/// - Merge with counts gathered by another trainer of the same order
/// - Build independent, normalized `Model` snapshots
///
/// # Invariants
/// - `order` is always >= 1
/// - Every starting key also has an entry in `transitions`
/// - All counts are strictly positive and never decrease
///
/// A trainer has a single writer: `teach` takes `&mut self`, so concurrent
/// mutation needs external synchronization.
#[derive(Clone, Debug)]
pub struct Trainer {
	/// Width of the context window, in characters
	order: usize,

	/// Starting keys and how often each one opened an observation
	start: Occurrences<String>,

	/// Context key -> successor counts
	transitions: HashMap<String, Occurrences<Symbol>>,

	/// Every lowercased observation taught so far
	observations: HashSet<String>,
}

impl Trainer {
	/// Creates an empty trainer with a window of `order` characters.
	///
	/// # Errors
	/// Returns `Error::InvalidOrder` if `order` is 0.
	pub fn new(order: usize) -> Result<Self> {
		if order == 0 {
			return Err(Error::InvalidOrder(order));
		}
		debug!("new trainer of order {order}");
		Ok(Self::empty(order))
	}

	fn empty(order: usize) -> Self {
		Self {
			order,
			start: Occurrences::new(),
			transitions: HashMap::new(),
			observations: HashSet::new(),
		}
	}

	/// Width of the context window.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of observations taught, repeats included.
	pub fn observation_count(&self) -> u64 {
		// every observation adds exactly one starting key
		self.start.total()
	}

	/// Returns `true` if nothing has been taught yet.
	pub fn is_empty(&self) -> bool {
		self.start.len() == 0
	}

	/// Adds one or more observations.
	///
	/// Repeated observations accumulate: nothing is deduplicated, so a
	/// sample taught twice weighs twice as much.
	pub fn teach<I, S>(&mut self, observations: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for observation in observations {
			self.teach_one(observation.as_ref());
		}
	}

	fn teach_one(&mut self, observation: &str) {
		let observation = observation.to_lowercase();
		let chars: Vec<char> = observation.chars().collect();
		self.observations.insert(observation.clone());

		if chars.len() <= self.order {
			self.start.add(observation.clone());
			self.increment(observation, Symbol::End);
			return;
		}

		for i in 0..=chars.len() - self.order {
			let key: String = chars[i..i + self.order].iter().collect();
			if i == 0 {
				self.start.add(key.clone());
			}
			let next = chars.get(i + self.order).map_or(Symbol::End, |c| Symbol::Char(*c));
			self.increment(key, next);
		}
	}

	fn increment(&mut self, context: String, next: Symbol) {
		self.transitions.entry(context).or_insert_with(Occurrences::new).add(next);
	}

	/// Teaches a large batch of observations using every available CPU.
	///
	/// The batch is split into `num_cpus * 8` chunks, each chunk is taught
	/// into its own partial trainer on a scoped thread, and the partials
	/// are merged back into `self`. The resulting counts are identical to
	/// a sequential `teach` of the same batch.
	pub fn teach_parallel<S>(&mut self, observations: &[S])
	where
		S: AsRef<str> + Sync,
	{
		if observations.is_empty() {
			return;
		}

		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = observations.len().div_ceil(chunks);
		debug!(
			"teaching {} observations in chunks of {chunk_size}",
			observations.len()
		);

		let order = self.order;
		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in observations.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = Trainer::empty(order);
					partial.teach(chunk);
					// the receiver outlives the scope
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		for partial in rx.iter() {
			self.absorb(&partial);
		}
	}

	/// Merges the counts of another trainer into this one.
	///
	/// # Errors
	/// Returns `Error::OrderMismatch` if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.order != other.order {
			return Err(Error::OrderMismatch { expected: self.order, found: other.order });
		}
		self.absorb(other);
		Ok(())
	}

	fn absorb(&mut self, other: &Self) {
		self.start.merge(&other.start);
		for (context, successors) in &other.transitions {
			if let Some(existing) = self.transitions.get_mut(context) {
				existing.merge(successors);
			} else {
				self.transitions.insert(context.clone(), successors.clone());
			}
		}
		self.observations.extend(other.observations.iter().cloned());
	}

	/// Builds a normalized model from the current counts.
	///
	/// The trainer is left untouched and can keep learning; each call
	/// returns an independent snapshot.
	pub fn build(&self) -> Model {
		let transitions: BTreeMap<_, _> = self
			.transitions
			.iter()
			.map(|(context, successors)| (context.clone(), successors.to_states()))
			.collect();

		debug!(
			"built model of order {}: {} start keys, {} contexts",
			self.order,
			self.start.len(),
			transitions.len()
		);

		Model::new(self.order, self.start.to_states(), transitions, self.observations.clone())
	}
}

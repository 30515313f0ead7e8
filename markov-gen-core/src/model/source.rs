use rand::Rng;

/// Anything able to produce uniform values in `[0, 1)` on demand.
///
/// Every `rand::Rng` is a source. Thread safety of a source is the
/// caller's concern: generation borrows it mutably for one call.
pub trait RandomSource {
	/// Next uniformly distributed value in `[0, 1)`.
	fn next_unit(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
	fn next_unit(&mut self) -> f64 {
		self.random::<f64>()
	}
}

/// Replays a fixed list of draws, cycling back to the first one when
/// the list is exhausted.
///
/// Useful to reproduce an exact generation independently of any PRNG
/// algorithm. An empty list always yields `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplaySource {
	draws: Vec<f64>,
	cursor: usize,
}

impl ReplaySource {
	/// Creates a source replaying `draws` in order.
	pub fn new(draws: Vec<f64>) -> Self {
		Self { draws, cursor: 0 }
	}
}

impl RandomSource for ReplaySource {
	fn next_unit(&mut self) -> f64 {
		if self.draws.is_empty() {
			return 0.0;
		}
		let draw = self.draws[self.cursor % self.draws.len()];
		self.cursor = (self.cursor + 1) % self.draws.len();
		draw
	}
}

use crate::error::{Error, Result};

/// Settings for `Model::predict`.
///
/// # Responsibilities
/// - Track how many extra attempts are allowed to avoid reproducing a
///   training observation (`nb_try`)
/// - Track an optional cap on the generated length, in characters
///
/// The default settings (`nb_try = 0`, no cap) make `predict` behave
/// exactly like `Model::generate`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictionInput {
	/// Number of additional attempts when the generated word is already
	/// part of the training observations.
	pub nb_try: usize,

	/// Maximum number of characters generated. `None` means unbounded.
	max_length: Option<usize>,
}

impl PredictionInput {
	/// Creates settings with the given retry budget and no length cap.
	pub fn new(nb_try: usize) -> Self {
		Self { nb_try, max_length: None }
	}

	/// Returns the current length cap.
	pub fn max_length(&self) -> Option<usize> {
		self.max_length
	}

	/// Sets the length cap.
	///
	/// # Errors
	/// Returns `Error::InvalidMaxLength` for `Some(0)`.
	pub fn set_max_length(&mut self, max_length: Option<usize>) -> Result<()> {
		if max_length == Some(0) {
			return Err(Error::InvalidMaxLength);
		}
		self.max_length = max_length;
		Ok(())
	}
}

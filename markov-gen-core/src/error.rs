/// Errors returned by the training and configuration API.
///
/// Generation itself never fails: degenerate models produce an empty string.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// The context window must be at least one character wide.
	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// Two trainers with different window widths cannot be combined.
	#[error("order mismatch: expected {expected}, found {found}")]
	OrderMismatch { expected: usize, found: usize },

	/// A length cap of zero would never produce output.
	#[error("max length must be >= 1")]
	InvalidMaxLength,
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

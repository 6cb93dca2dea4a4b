//! Errors for graph document decoding.
//!
//! Geometry never fails; only turning host input into a [`GraphDocument`]
//! can.
//!
//! [`GraphDocument`]: super::types::GraphDocument

use thiserror::Error;

/// Error type for loading or saving a graph document.
#[derive(Debug, Error)]
pub enum DocumentError {
	/// The DOM element expected to hold the document does not exist.
	#[error("missing element: {0}")]
	MissingElement(String),
	/// Serialization/deserialization failure.
	#[error("serde error: {0}")]
	Parse(#[from] serde_json::Error),
}

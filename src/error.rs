//! Error type shared by the widgets, DOM hosts and engines.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while drawing or clearing a widget.
#[derive(Debug, Error)]
pub enum VizError {
	/// A required element (usually the content root) is not in the document.
	#[error("element `{0}` not found")]
	MissingElement(String),
	/// The DOM host refused an operation.
	#[error("dom operation failed: {0}")]
	Dom(String),
	/// The chart or layout engine raised an error.
	#[error("engine error: {0}")]
	Engine(String),
	/// Widget configuration could not be parsed.
	#[error("invalid configuration: {0}")]
	Config(#[source] serde_json::Error),
	/// A chart configuration could not be serialized for the engine.
	#[error("could not serialize chart configuration: {0}")]
	Serialize(#[source] serde_json::Error),
}

impl VizError {
	pub(crate) fn dom(err: JsValue) -> Self {
		Self::Dom(describe(&err))
	}

	pub(crate) fn engine(err: JsValue) -> Self {
		Self::Engine(describe(&err))
	}
}

fn describe(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

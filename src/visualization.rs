//! The contract shared by every widget.

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Space around the plot area, in pixels. Serializes as a C3 `padding` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
	/// Top margin.
	pub top: f64,
	/// Right margin.
	pub right: f64,
	/// Bottom margin.
	pub bottom: f64,
	/// Left margin.
	pub left: f64,
}

impl Margin {
	/// The same margin on all four sides.
	pub fn uniform(value: f64) -> Self {
		Self {
			top: value,
			right: value,
			bottom: value,
			left: value,
		}
	}
}

/// Pixel geometry a widget draws into.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
	/// Total width.
	pub width: f64,
	/// Total height.
	pub height: f64,
	/// Margin around the drawing.
	pub margin: Margin,
}

impl Geometry {
	/// Geometry with no margin.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			margin: Margin::default(),
		}
	}

	/// Replace the margin.
	pub fn with_margin(mut self, margin: Margin) -> Self {
		self.margin = margin;
		self
	}
}

/// A widget that renders one kind of input into the document.
pub trait Visualization {
	/// What `draw` consumes.
	type Input;

	/// Current geometry.
	fn geometry(&self) -> Geometry;

	/// Change the geometry used by the next `draw`.
	fn resize(&mut self, geometry: Geometry);

	/// Render `input`. Creates the widget's container under its content root.
	fn draw(&mut self, input: &Self::Input) -> Result<(), VizError>;

	/// Remove whatever `draw` created. Safe to call when nothing was drawn.
	fn clear(&mut self);

	/// Remove the widget header. Widgets without a header leave this a no-op.
	fn clear_header(&mut self) {}

	/// Clear the previous rendering, then draw `input`.
	fn redraw(&mut self, input: &Self::Input) -> Result<(), VizError> {
		self.clear_header();
		self.clear();
		self.draw(input)
	}
}

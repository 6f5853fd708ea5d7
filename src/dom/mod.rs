//! DOM utilities the widgets are handed at construction.

mod memory;
mod web;

pub use memory::{ElementId, MemoryDom, MemoryNode};
pub use web::WebDom;

use crate::error::VizError;

/// The document operations a widget needs.
pub trait DomHost {
	/// Handle to an element in this host.
	type Element: Clone;

	/// Find an element anywhere in the document by id.
	fn element_by_id(&self, id: &str) -> Option<Self::Element>;

	/// Return the child `div` of `parent` whose id is `name`, creating it
	/// (with `id` and `class` set to `name`) if there is none.
	fn generate_div(&mut self, parent: &Self::Element, name: &str) -> Result<Self::Element, VizError>;

	/// Append an SVG canvas of the given size to `parent`.
	fn append_svg(&mut self, parent: &Self::Element, width: f64, height: f64) -> Result<Self::Element, VizError>;

	/// Append an SVG element named `tag` to `parent`.
	fn append_svg_child(&mut self, parent: &Self::Element, tag: &str) -> Result<Self::Element, VizError>;

	/// Set one attribute on `element`.
	fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str) -> Result<(), VizError>;

	/// Replace the text content of `element`.
	fn set_text(&mut self, element: &Self::Element, text: &str) -> Result<(), VizError>;

	/// Detach `element` from the document if it is given and still attached.
	fn remove_element_if_exists(&mut self, element: Option<&Self::Element>);
}

use web_sys::{Document, Element};

use super::DomHost;
use crate::error::VizError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The browser document, through web-sys.
#[derive(Clone, Debug)]
pub struct WebDom {
	document: Document,
}

impl WebDom {
	/// Wrap a document.
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// The document of the current window.
	pub fn from_window() -> Result<Self, VizError> {
		web_sys::window()
			.and_then(|w| w.document())
			.map(Self::new)
			.ok_or_else(|| VizError::MissingElement("document".into()))
	}
}

impl DomHost for WebDom {
	type Element = Element;

	fn element_by_id(&self, id: &str) -> Option<Element> {
		self.document.get_element_by_id(id)
	}

	fn generate_div(&mut self, parent: &Element, name: &str) -> Result<Element, VizError> {
		if let Some(existing) = parent
			.query_selector(&format!(":scope > div#{name}"))
			.map_err(VizError::dom)?
		{
			return Ok(existing);
		}
		let div = self.document.create_element("div").map_err(VizError::dom)?;
		div.set_id(name);
		div.set_class_name(name);
		parent.append_child(&div).map_err(VizError::dom)?;
		Ok(div)
	}

	fn append_svg(&mut self, parent: &Element, width: f64, height: f64) -> Result<Element, VizError> {
		let svg = self
			.document
			.create_element_ns(Some(SVG_NS), "svg")
			.map_err(VizError::dom)?;
		svg.set_attribute("width", &width.to_string()).map_err(VizError::dom)?;
		svg.set_attribute("height", &height.to_string()).map_err(VizError::dom)?;
		parent.append_child(&svg).map_err(VizError::dom)?;
		Ok(svg)
	}

	fn append_svg_child(&mut self, parent: &Element, tag: &str) -> Result<Element, VizError> {
		let child = self
			.document
			.create_element_ns(Some(SVG_NS), tag)
			.map_err(VizError::dom)?;
		parent.append_child(&child).map_err(VizError::dom)?;
		Ok(child)
	}

	fn set_attribute(&mut self, element: &Element, name: &str, value: &str) -> Result<(), VizError> {
		element.set_attribute(name, value).map_err(VizError::dom)
	}

	fn set_text(&mut self, element: &Element, text: &str) -> Result<(), VizError> {
		element.set_text_content(Some(text));
		Ok(())
	}

	fn remove_element_if_exists(&mut self, element: Option<&Element>) {
		if let Some(element) = element {
			element.remove();
		}
	}
}

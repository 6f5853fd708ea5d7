use svg::Document;
use svg::node::element::{Circle, Line, Text};

use super::layout::Point;
use super::types::{GraphInput, Link};
use crate::config::{GraphSettings, LabelOffset};

/// Line drawn for an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePrimitive {
	/// The edge this line follows.
	pub link: Link,
	/// Source x.
	pub x1: f64,
	/// Source y.
	pub y1: f64,
	/// Target x.
	pub x2: f64,
	/// Target y.
	pub y2: f64,
}

/// Circle drawn for a vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePrimitive {
	/// Index of the vertex.
	pub vertex: usize,
	/// Center x.
	pub cx: f64,
	/// Center y.
	pub cy: f64,
	/// Radius.
	pub r: f64,
}

/// Text drawn next to a vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPrimitive {
	/// Index of the vertex.
	pub vertex: usize,
	/// The vertex label.
	pub text: String,
	/// Baseline x.
	pub x: f64,
	/// Baseline y.
	pub y: f64,
}

/// How one primitive maps onto an SVG element. `fixed` attributes and the
/// text are written once when the element is created; `moving` attributes
/// are rewritten on every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgElement {
	/// Tag name.
	pub tag: &'static str,
	/// Attributes that never change after binding.
	pub fixed: Vec<(&'static str, String)>,
	/// Position attributes.
	pub moving: Vec<(&'static str, String)>,
	/// Text content.
	pub text: Option<String>,
}

/// The primitives of a drawn graph. Positions are NaN until the first tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphScene {
	/// One per edge, in edge order.
	pub lines: Vec<LinePrimitive>,
	/// One per vertex, in vertex order.
	pub circles: Vec<CirclePrimitive>,
	/// One per vertex, in vertex order.
	pub labels: Vec<LabelPrimitive>,
	node_radius: f64,
	label_offset: LabelOffset,
	label_fill: String,
}

impl GraphScene {
	/// Bind every edge to a line and every vertex to a circle and a label.
	pub fn bind(input: &GraphInput, links: &[Link], settings: &GraphSettings) -> Self {
		let lines = links
			.iter()
			.map(|&link| LinePrimitive {
				link,
				x1: f64::NAN,
				y1: f64::NAN,
				x2: f64::NAN,
				y2: f64::NAN,
			})
			.collect();
		let circles = (0..input.vertices.len())
			.map(|vertex| CirclePrimitive {
				vertex,
				cx: f64::NAN,
				cy: f64::NAN,
				r: settings.node_radius,
			})
			.collect();
		let labels = input
			.vertices
			.iter()
			.enumerate()
			.map(|(vertex, v)| LabelPrimitive {
				vertex,
				text: v.label.clone(),
				x: f64::NAN,
				y: f64::NAN,
			})
			.collect();

		Self {
			lines,
			circles,
			labels,
			node_radius: settings.node_radius,
			label_offset: settings.label_offset,
			label_fill: settings.label_fill.clone(),
		}
	}

	/// Move every primitive to the positions of its vertices.
	pub fn update(&mut self, positions: &[Point]) {
		let at = |vertex: Option<usize>| {
			vertex
				.and_then(|v| positions.get(v))
				.copied()
				.unwrap_or(Point::UNDEFINED)
		};

		for circle in &mut self.circles {
			let p = at(Some(circle.vertex));
			circle.r = self.node_radius;
			circle.cx = p.x;
			circle.cy = p.y;
		}

		let offset = self.label_offset;
		for label in &mut self.labels {
			let p = at(Some(label.vertex));
			label.x = p.x + offset.dx;
			label.y = p.y + offset.dy;
		}

		for line in &mut self.lines {
			let (source, target) = (at(line.link.source), at(line.link.target));
			line.x1 = source.x;
			line.y1 = source.y;
			line.x2 = target.x;
			line.y2 = target.y;
		}
	}

	/// Lines first, then circles, then labels.
	pub fn elements(&self) -> Vec<SvgElement> {
		let lines = self.lines.iter().map(|l| SvgElement {
			tag: "line",
			fixed: vec![("class", "link".into())],
			moving: vec![
				("x1", l.x1.to_string()),
				("y1", l.y1.to_string()),
				("x2", l.x2.to_string()),
				("y2", l.y2.to_string()),
			],
			text: None,
		});
		let circles = self.circles.iter().map(|c| SvgElement {
			tag: "circle",
			fixed: vec![("class", "node".into())],
			moving: vec![
				("r", c.r.to_string()),
				("cx", c.cx.to_string()),
				("cy", c.cy.to_string()),
			],
			text: None,
		});
		let labels = self.labels.iter().map(|t| SvgElement {
			tag: "text",
			fixed: vec![("fill", self.label_fill.clone())],
			moving: vec![("x", t.x.to_string()), ("y", t.y.to_string())],
			text: Some(t.text.clone()),
		});
		lines.chain(circles).chain(labels).collect()
	}

	/// A standalone SVG document of the current frame.
	pub fn to_document(&self, width: f64, height: f64) -> Document {
		let mut document = Document::new()
			.set("width", width)
			.set("height", height)
			.set("viewBox", (0.0, 0.0, width, height));

		for l in &self.lines {
			document = document.add(
				Line::new()
					.set("class", "link")
					.set("x1", l.x1)
					.set("y1", l.y1)
					.set("x2", l.x2)
					.set("y2", l.y2),
			);
		}
		for c in &self.circles {
			document = document.add(
				Circle::new()
					.set("class", "node")
					.set("r", c.r)
					.set("cx", c.cx)
					.set("cy", c.cy),
			);
		}
		for t in &self.labels {
			document = document.add(
				Text::new(t.text.as_str())
					.set("fill", self.label_fill.as_str())
					.set("x", t.x)
					.set("y", t.y),
			);
		}
		document
	}
}

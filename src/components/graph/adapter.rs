use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use super::layout::LayoutEngine;
use super::scene::GraphScene;
use super::types::GraphInput;
use crate::config::GraphSettings;
use crate::dom::DomHost;
use crate::error::VizError;
use crate::visualization::{Geometry, Visualization};

/// Link distance for a canvas: the smaller side over `divisor`.
pub fn link_distance_for(width: f64, height: f64, divisor: f64) -> f64 {
	width.min(height) / divisor
}

/// Draws a vertex/edge graph as SVG, positioned by a force layout.
pub struct GraphAdapter<D: DomHost, L: LayoutEngine> {
	dom: D,
	layout: L,
	content: D::Element,
	geometry: Geometry,
	settings: GraphSettings,
	graph_div: Option<D::Element>,
	bound: Vec<D::Element>,
	scene: Rc<RefCell<GraphScene>>,
	link_distance: Option<f64>,
}

impl<D: DomHost, L: LayoutEngine> GraphAdapter<D, L> {
	/// A widget drawing under `content` with `layout` as its engine.
	pub fn new(dom: D, layout: L, content: D::Element, geometry: Geometry, settings: GraphSettings) -> Self {
		Self {
			dom,
			layout,
			content,
			geometry,
			settings,
			graph_div: None,
			bound: Vec::new(),
			scene: Rc::new(RefCell::new(GraphScene::default())),
			link_distance: None,
		}
	}

	/// Advance the layout by `dt` seconds and repaint. Returns whether the
	/// layout is still running.
	pub fn tick(&mut self, dt: f32) -> Result<bool, VizError> {
		if !self.layout.is_running() {
			return Ok(false);
		}
		self.layout.step(dt);
		self.render()?;
		Ok(self.layout.is_running())
	}

	/// Advance one frame of the configured length.
	pub fn tick_frame(&mut self) -> Result<bool, VizError> {
		self.tick(self.settings.frame_dt)
	}

	/// Whether the layout is still simulating.
	pub fn is_running(&self) -> bool {
		self.layout.is_running()
	}

	/// Link distance handed to the layout by the last `draw`.
	pub fn link_distance(&self) -> Option<f64> {
		self.link_distance
	}

	/// Snapshot of the drawn primitives.
	pub fn scene(&self) -> GraphScene {
		self.scene.borrow().clone()
	}

	/// The layout engine.
	pub fn layout(&self) -> &L {
		&self.layout
	}

	/// The graph container, while drawn.
	pub fn container(&self) -> Option<&D::Element> {
		self.graph_div.as_ref()
	}

	/// The current frame as a standalone SVG document.
	pub fn export_svg(&self) -> svg::Document {
		self.scene
			.borrow()
			.to_document(self.geometry.width, self.geometry.height)
	}

	/// Create one SVG element per primitive under `svg`.
	fn bind_elements(&mut self, svg: &D::Element) -> Result<(), VizError> {
		let elements = self.scene.borrow().elements();
		let mut bound = Vec::with_capacity(elements.len());
		for element in &elements {
			let child = self.dom.append_svg_child(svg, element.tag)?;
			for (name, value) in element.fixed.iter().chain(&element.moving) {
				self.dom.set_attribute(&child, name, value)?;
			}
			if let Some(text) = &element.text {
				self.dom.set_text(&child, text)?;
			}
			bound.push(child);
		}
		self.bound = bound;
		Ok(())
	}

	/// Write the current positions onto the bound elements.
	fn render(&mut self) -> Result<(), VizError> {
		let elements = self.scene.borrow().elements();
		for (child, element) in self.bound.iter().zip(&elements) {
			for (name, value) in &element.moving {
				self.dom.set_attribute(child, name, value)?;
			}
		}
		Ok(())
	}
}

impl<D: DomHost, L: LayoutEngine> Visualization for GraphAdapter<D, L> {
	type Input = GraphInput;

	fn geometry(&self) -> Geometry {
		self.geometry
	}

	fn resize(&mut self, geometry: Geometry) {
		self.geometry = geometry;
	}

	fn draw(&mut self, graph: &GraphInput) -> Result<(), VizError> {
		let (width, height) = (self.geometry.width, self.geometry.height);
		let links = graph.resolve_links();
		let resolved: Vec<(usize, usize)> = links.iter().filter_map(|l| l.endpoints()).collect();
		if resolved.len() < links.len() {
			warn!(
				"{} of {} edges reference missing vertices; their position is undefined",
				links.len() - resolved.len(),
				links.len()
			);
		}

		let div = self.dom.generate_div(&self.content, &self.settings.container)?;
		self.graph_div = Some(div.clone());
		let svg = self.dom.append_svg(&div, width, height)?;

		let distance = link_distance_for(width, height, self.settings.link_distance_divisor);
		self.link_distance = Some(distance);
		self.layout.size(width, height);
		self.layout.nodes(&graph.vertices);
		self.layout.links(&resolved);
		self.layout.link_distance(distance);

		self.scene = Rc::new(RefCell::new(GraphScene::bind(graph, &links, &self.settings)));
		let scene = self.scene.clone();
		self.layout.clear_listeners();
		self.layout.on_tick(Box::new(move |positions| {
			scene.borrow_mut().update(positions);
		}));

		self.bind_elements(&svg)?;
		self.layout.start();
		info!(
			"graph drawn: {} vertices, {} edges on {}x{}",
			graph.vertices.len(),
			graph.edges.len(),
			width,
			height
		);
		self.render()
	}

	fn clear(&mut self) {
		self.layout.stop();
		self.layout.clear_listeners();
		self.dom.remove_element_if_exists(self.graph_div.as_ref());
		if self.graph_div.take().is_some() {
			debug!("graph cleared");
		}
		self.bound.clear();
	}
}

use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::types::Vertex;
use crate::config::SimulationSettings;

/// A position on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Position of a node the layout has not placed.
	pub const UNDEFINED: Point = Point {
		x: f64::NAN,
		y: f64::NAN,
	};

	/// A point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Called after every simulation step with node positions, by vertex index.
pub type TickListener = Box<dyn FnMut(&[Point])>;

/// A force-directed layout engine.
///
/// Configuration calls come before `start`; `step` is driven by the caller's
/// frame loop and notifies tick listeners while the layout runs.
pub trait LayoutEngine {
	/// Canvas size the layout spreads nodes over.
	fn size(&mut self, width: f64, height: f64);
	/// The nodes to place. Positions are reported in this order.
	fn nodes(&mut self, vertices: &[Vertex]);
	/// Links as pairs of vertex indices.
	fn links(&mut self, links: &[(usize, usize)]);
	/// Preferred length of a link.
	fn link_distance(&mut self, distance: f64);
	/// Subscribe to ticks.
	fn on_tick(&mut self, listener: TickListener);
	/// Drop every tick listener.
	fn clear_listeners(&mut self);
	/// Seed positions and begin simulating.
	fn start(&mut self);
	/// Halt the simulation.
	fn stop(&mut self);
	/// Whether `step` still advances the simulation.
	fn is_running(&self) -> bool;
	/// Advance one tick of `dt` seconds.
	fn step(&mut self, dt: f32);
	/// Current node positions.
	fn positions(&self) -> &[Point];
}

/// [`LayoutEngine`] backed by the `force_graph` simulation, with d3-style
/// cooling: the layout stops by itself once `alpha` falls below `alpha_min`.
///
/// `alpha` is only a countdown to that stop. It does not scale the forces;
/// damping alone settles the nodes.
pub struct ForceLayout {
	settings: SimulationSettings,
	width: f64,
	height: f64,
	vertex_count: usize,
	links: Vec<(usize, usize)>,
	link_distance: f64,
	graph: Option<ForceGraph<usize, ()>>,
	positions: Vec<Point>,
	listeners: Vec<TickListener>,
	alpha: f64,
	running: bool,
}

impl ForceLayout {
	/// A stopped layout with the given parameters.
	pub fn new(settings: SimulationSettings) -> Self {
		Self {
			settings,
			width: 0.0,
			height: 0.0,
			vertex_count: 0,
			links: Vec::new(),
			link_distance: 30.0,
			graph: None,
			positions: Vec::new(),
			listeners: Vec::new(),
			alpha: 0.0,
			running: false,
		}
	}

	/// Current cooling temperature, 1 right after `start`. Decides when the
	/// layout stops and nothing else.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	fn parameters(&self) -> SimulationParameters {
		let mass = self.settings.node_mass.max(f32::EPSILON);
		// Charge balancing the spring at `link_distance` for an isolated pair:
		// spring pulls with `k d / 2`, charge pushes with `q m^2 / d^2`.
		let distance = self.link_distance as f32;
		let force_charge = self.settings.force_spring * distance.powi(3) / (2.0 * mass * mass);
		SimulationParameters {
			force_charge,
			force_spring: self.settings.force_spring,
			force_max: self.settings.force_max,
			node_speed: self.settings.node_speed,
			damping_factor: self.settings.damping_factor,
		}
	}

	fn seed_positions(&self) -> Vec<Point> {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let radius = self.link_distance.max(1.0);
		let n = self.vertex_count.max(1) as f64;
		(0..self.vertex_count)
			.map(|i| {
				let angle = (i as f64) * 2.0 * PI / n;
				Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
			})
			.collect()
	}
}

impl Default for ForceLayout {
	fn default() -> Self {
		Self::new(SimulationSettings::default())
	}
}

impl LayoutEngine for ForceLayout {
	fn size(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn nodes(&mut self, vertices: &[Vertex]) {
		self.vertex_count = vertices.len();
	}

	fn links(&mut self, links: &[(usize, usize)]) {
		self.links = links.to_vec();
	}

	fn link_distance(&mut self, distance: f64) {
		self.link_distance = distance;
	}

	fn on_tick(&mut self, listener: TickListener) {
		self.listeners.push(listener);
	}

	fn clear_listeners(&mut self) {
		self.listeners.clear();
	}

	fn start(&mut self) {
		let mut graph = ForceGraph::new(self.parameters());
		let positions = self.seed_positions();
		let indices: Vec<_> = positions
			.iter()
			.enumerate()
			.map(|(vertex, p)| {
				graph.add_node(NodeData {
					x: p.x as f32,
					y: p.y as f32,
					mass: self.settings.node_mass,
					is_anchor: false,
					user_data: vertex,
				})
			})
			.collect();

		for &(source, target) in &self.links {
			match (indices.get(source), indices.get(target)) {
				(Some(&src), Some(&tgt)) if source != target => {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				_ => {}
			}
		}

		debug!(
			"force layout started: {} nodes, {} links, link distance {:.2}",
			self.vertex_count,
			self.links.len(),
			self.link_distance
		);
		self.graph = Some(graph);
		self.positions = positions;
		self.alpha = 1.0;
		self.running = true;
	}

	fn stop(&mut self) {
		self.running = false;
		self.alpha = 0.0;
	}

	fn is_running(&self) -> bool {
		self.running
	}

	fn step(&mut self, dt: f32) {
		if !self.running {
			return;
		}
		let Some(graph) = self.graph.as_mut() else {
			return;
		};
		graph.update(dt);

		let positions = &mut self.positions;
		graph.visit_nodes(|node| {
			if let Some(p) = positions.get_mut(node.data.user_data) {
				*p = Point::new(node.x() as f64, node.y() as f64);
			}
		});

		self.alpha *= self.settings.alpha_decay;
		if self.alpha < self.settings.alpha_min {
			debug!("force layout cooled down");
			self.running = false;
		}

		for listener in &mut self.listeners {
			listener(&self.positions);
		}
	}

	fn positions(&self) -> &[Point] {
		&self.positions
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	fn pair() -> ForceLayout {
		let mut layout = ForceLayout::default();
		layout.size(800.0, 600.0);
		layout.nodes(&[Vertex::labeled("a"), Vertex::labeled("b")]);
		layout.links(&[(0, 1)]);
		layout.link_distance(600.0 / 6.5);
		layout
	}

	#[test]
	fn start_seeds_nodes_around_the_center() {
		let mut layout = pair();
		assert!(!layout.is_running());
		layout.start();
		assert!(layout.is_running());
		assert_eq!(layout.alpha(), 1.0);

		let positions = layout.positions();
		assert_eq!(positions.len(), 2);
		let d = 600.0 / 6.5;
		assert!((positions[0].x - (400.0 + d)).abs() < 1e-9);
		assert!((positions[0].y - 300.0).abs() < 1e-9);
		assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
	}

	#[test]
	fn step_notifies_listeners_with_current_positions() {
		let mut layout = pair();
		let ticks = Rc::new(Cell::new(0));
		let seen = ticks.clone();
		layout.on_tick(Box::new(move |positions| {
			assert_eq!(positions.len(), 2);
			seen.set(seen.get() + 1);
		}));

		layout.step(0.016);
		assert_eq!(ticks.get(), 0, "no ticks before start");

		layout.start();
		layout.step(0.016);
		layout.step(0.016);
		assert_eq!(ticks.get(), 2);
	}

	#[test]
	fn cooling_stops_the_layout() {
		let mut settings = SimulationSettings::default();
		settings.alpha_decay = 0.5;
		settings.alpha_min = 0.1;
		let mut layout = ForceLayout::new(settings);
		layout.size(100.0, 100.0);
		layout.nodes(&[Vertex::labeled("solo")]);
		layout.start();

		let mut steps = 0;
		while layout.is_running() {
			layout.step(0.016);
			steps += 1;
			assert!(steps < 10);
		}
		// 0.5^4 = 0.0625 is the first value under 0.1.
		assert_eq!(steps, 4);
	}

	#[test]
	fn cooled_pair_settles_at_the_link_distance() {
		for (w, h) in [(800.0, 600.0), (300.0, 300.0)] {
			let target = f64::min(w, h) / 6.5;
			let mut layout = ForceLayout::default();
			layout.size(w, h);
			layout.nodes(&[Vertex::labeled("a"), Vertex::labeled("b")]);
			layout.links(&[(0, 1)]);
			layout.link_distance(target);
			layout.start();

			let mut steps = 0;
			while layout.is_running() {
				layout.step(0.016);
				steps += 1;
				assert!(steps < 2000);
			}
			let [a, b] = [layout.positions()[0], layout.positions()[1]];
			let distance = (a.x - b.x).hypot(a.y - b.y);
			assert!(
				(distance - target).abs() / target < 0.05,
				"settled at {distance:.2}, wanted {target:.2}"
			);
		}
	}

	#[test]
	fn stop_halts_immediately() {
		let mut layout = pair();
		layout.start();
		let before = layout.positions().to_vec();
		layout.stop();
		layout.step(0.016);
		assert!(!layout.is_running());
		assert_eq!(layout.positions(), before.as_slice());
	}
}

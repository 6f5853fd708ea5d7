use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::components::chart::{C3Engine, ChartAdapter, ChartInput};
use crate::components::graph::{Edge, ForceLayout, GraphAdapter, GraphInput, Vertex, run_animation};
use crate::config::WidgetConfig;
use crate::dom::WebDom;
use crate::error::VizError;
use crate::visualization::{Geometry, Margin, Visualization};

/// Generate a sample graph (random tree).
fn generate_sample_graph(n: usize) -> GraphInput {
	let vertices = (0..n)
		.map(|i| Vertex::labeled(format!("Node {}", i)).with_id(i.to_string()))
		.collect();

	let edges = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			Edge::new(i.to_string().as_str(), target)
		})
		.collect();

	GraphInput { vertices, edges }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn sample_chart() -> Result<ChartInput, VizError> {
	ChartInput::from_value(json!({
		"data": {
			"columns": [
				["reads", 30, 200, 100, 400, 150, 250],
				["writes", 50, 20, 10, 40, 15, 25]
			],
			"type": "spline"
		}
	}))
}

fn window_size() -> (f64, f64) {
	let Some(window) = web_sys::window() else {
		return (800.0, 600.0);
	};
	let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0))
}

fn mount_widgets(graph_host: Element, config: &WidgetConfig) -> Result<(), VizError> {
	let dom = WebDom::from_window()?;
	let (w, h) = window_size();
	let (w, h) = (w * 0.9, h * 0.45);

	let mut chart = ChartAdapter::new(
		dom.clone(),
		C3Engine::new(),
		config.content_root_id.clone(),
		Geometry::new(w, h).with_margin(Margin {
			top: 10.0,
			right: 20.0,
			bottom: 10.0,
			left: 40.0,
		}),
		config.chart.clone(),
	);
	chart.draw(&sample_chart()?)?;

	let mut graph = GraphAdapter::new(
		dom,
		ForceLayout::new(config.graph.simulation.clone()),
		graph_host,
		Geometry::new(w, h),
		config.graph.clone(),
	);
	graph.draw(&generate_sample_graph(60))?;
	run_animation(Rc::new(RefCell::new(graph)))?;
	info!("widgets mounted");
	Ok(())
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_ref = NodeRef::<leptos::html::Div>::new();

	Effect::new(move |_| {
		let Some(host) = graph_ref.get() else {
			return;
		};
		let host: Element = host.unchecked_into();
		if let Err(err) = mount_widgets(host, &WidgetConfig::default()) {
			error!("could not mount widgets: {err}");
		}
	});

	view! {
		<div id="content" class="content">
			<h1>"Chart and Force-Directed Graph"</h1>
			<div class="graph-host" node_ref=graph_ref></div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_graph_is_a_tree_over_its_vertices() {
		let graph = generate_sample_graph(40);
		assert_eq!(graph.edges.len(), 39);
		assert!(graph.resolve_links().iter().all(|l| l.endpoints().is_some()));
	}

	#[test]
	fn sample_chart_is_an_object() {
		assert!(sample_chart().unwrap().get("data").is_some());
	}
}

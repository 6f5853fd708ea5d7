use log::{debug, info};

use super::engine::{ChartEngine, ChartInput, ChartSize};
use crate::config::ChartSettings;
use crate::dom::DomHost;
use crate::error::VizError;
use crate::visualization::{Geometry, Visualization};

/// Hands chart descriptions to a charting engine, sized to the widget.
pub struct ChartAdapter<D: DomHost, E: ChartEngine> {
	dom: D,
	engine: E,
	content_root_id: String,
	geometry: Geometry,
	settings: ChartSettings,
	chart_div: Option<D::Element>,
}

impl<D: DomHost, E: ChartEngine> ChartAdapter<D, E> {
	/// A widget drawing under the element with id `content_root_id`.
	pub fn new(
		dom: D,
		engine: E,
		content_root_id: impl Into<String>,
		geometry: Geometry,
		settings: ChartSettings,
	) -> Self {
		Self {
			dom,
			engine,
			content_root_id: content_root_id.into(),
			geometry,
			settings,
			chart_div: None,
		}
	}

	/// `chart` with size, padding and binding filled in from the widget.
	pub fn configure(&self, chart: &ChartInput) -> Result<ChartInput, VizError> {
		let size = ChartSize {
			width: self.geometry.width,
			height: (self.geometry.height - self.settings.legend_margin).max(0.0),
		};
		chart
			.clone()
			.with_layout(size, self.geometry.margin, &format!("#{}", self.settings.container))
	}

	/// The engine.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// The chart container, while drawn.
	pub fn container(&self) -> Option<&D::Element> {
		self.chart_div.as_ref()
	}
}

impl<D: DomHost, E: ChartEngine> Visualization for ChartAdapter<D, E> {
	type Input = ChartInput;

	fn geometry(&self) -> Geometry {
		self.geometry
	}

	fn resize(&mut self, geometry: Geometry) {
		self.geometry = geometry;
	}

	fn draw(&mut self, chart: &ChartInput) -> Result<(), VizError> {
		let root = self
			.dom
			.element_by_id(&self.content_root_id)
			.ok_or_else(|| VizError::MissingElement(self.content_root_id.clone()))?;
		self.chart_div = Some(self.dom.generate_div(&root, &self.settings.container)?);

		let config = self.configure(chart)?;
		self.engine.generate(&config)?;
		info!("chart drawn at {}x{}", self.geometry.width, self.geometry.height);
		Ok(())
	}

	fn clear(&mut self) {
		self.engine.destroy();
		self.dom.remove_element_if_exists(self.chart_div.as_ref());
		if self.chart_div.take().is_some() {
			debug!("chart cleared");
		}
	}

	fn clear_header(&mut self) {}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::dom::{ElementId, MemoryDom};
	use crate::visualization::Margin;

	#[derive(Default)]
	struct RecordingEngine {
		configs: Vec<ChartInput>,
		fail: bool,
		destroyed: usize,
	}

	impl ChartEngine for RecordingEngine {
		fn generate(&mut self, config: &ChartInput) -> Result<(), VizError> {
			if self.fail {
				return Err(VizError::Engine("no data".into()));
			}
			self.configs.push(config.clone());
			Ok(())
		}

		fn destroy(&mut self) {
			self.destroyed += 1;
		}
	}

	fn setup(geometry: Geometry) -> (MemoryDom, ElementId, ChartAdapter<MemoryDom, RecordingEngine>) {
		let dom = MemoryDom::new();
		let content = dom.append_element(dom.body(), "div", "content");
		let adapter = ChartAdapter::new(
			dom.clone(),
			RecordingEngine::default(),
			"content",
			geometry,
			ChartSettings::default(),
		);
		(dom, content, adapter)
	}

	fn line_chart() -> ChartInput {
		ChartInput::from_value(json!({
			"data": {"columns": [["requests", 30, 200, 100]]},
			"size": {"width": 1, "height": 1}
		}))
		.unwrap()
	}

	#[test]
	fn size_reserves_the_legend_margin_and_padding_is_the_margin() {
		let cases = [
			(800.0, 600.0, Margin::uniform(10.0)),
			(41.0, 41.0, Margin::default()),
			(1280.0, 720.0, Margin { top: 5.0, right: 20.0, bottom: 30.0, left: 50.0 }),
		];
		for (w, h, m) in cases {
			let (_, _, mut adapter) = setup(Geometry::new(w, h).with_margin(m));
			adapter.draw(&line_chart()).unwrap();

			let config = adapter.engine().configs.last().unwrap();
			assert_eq!(config.size(), Some(ChartSize { width: w, height: h - 40.0 }));
			assert_eq!(config.padding(), Some(m));
			assert_eq!(config.get("data"), line_chart().get("data"));
		}
	}

	#[test]
	fn bindto_defaults_to_the_container_but_is_not_overridden() {
		let (_, _, mut adapter) = setup(Geometry::new(400.0, 300.0));
		adapter.draw(&line_chart()).unwrap();
		let mut custom = line_chart();
		custom.0.insert("bindto".into(), json!("#elsewhere"));
		adapter.draw(&custom).unwrap();

		let configs = &adapter.engine().configs;
		assert_eq!(configs[0].get("bindto"), Some(&json!("#chart")));
		assert_eq!(configs[1].get("bindto"), Some(&json!("#elsewhere")));
	}

	#[test]
	fn draw_creates_one_container_under_the_content_root() {
		let (dom, content, mut adapter) = setup(Geometry::new(400.0, 300.0));
		adapter.draw(&line_chart()).unwrap();
		adapter.draw(&line_chart()).unwrap();

		let children = dom.children(content);
		assert_eq!(children.len(), 1);
		assert_eq!(Some(&children[0]), adapter.container());
		assert_eq!(dom.node(children[0]).unwrap().attribute("class"), Some("chart"));
	}

	#[test]
	fn missing_content_root_is_an_error() {
		let dom = MemoryDom::new();
		let mut adapter = ChartAdapter::new(
			dom,
			RecordingEngine::default(),
			"content",
			Geometry::new(400.0, 300.0),
			ChartSettings::default(),
		);
		let err = adapter.draw(&line_chart()).unwrap_err();
		assert!(matches!(err, VizError::MissingElement(ref id) if id == "content"));
		assert!(adapter.engine().configs.is_empty());
	}

	#[test]
	fn engine_failures_propagate() {
		let (_, _, mut adapter) = setup(Geometry::new(400.0, 300.0));
		adapter.engine.fail = true;
		assert!(matches!(adapter.draw(&line_chart()), Err(VizError::Engine(_))));
	}

	#[test]
	fn clear_header_leaves_the_document_alone() {
		let (dom, _, mut adapter) = setup(Geometry::new(400.0, 300.0));
		let before = dom.snapshot();
		adapter.clear_header();
		assert_eq!(dom.snapshot(), before);

		adapter.draw(&line_chart()).unwrap();
		let drawn = dom.snapshot();
		adapter.clear_header();
		assert_eq!(dom.snapshot(), drawn);
	}

	#[test]
	fn clear_is_idempotent() {
		let (dom, content, mut adapter) = setup(Geometry::new(400.0, 300.0));
		adapter.draw(&line_chart()).unwrap();
		adapter.clear();
		assert!(dom.children(content).is_empty());
		assert!(adapter.container().is_none());
		adapter.clear();
		assert!(dom.children(content).is_empty());
	}

	#[test]
	fn clear_releases_the_engine_chart() {
		let (_, _, mut adapter) = setup(Geometry::new(400.0, 300.0));
		adapter.draw(&line_chart()).unwrap();
		adapter.clear();
		assert_eq!(adapter.engine().destroyed, 1);

		adapter.redraw(&line_chart()).unwrap();
		assert_eq!(adapter.engine().destroyed, 2);
		assert_eq!(adapter.engine().configs.len(), 2);
	}

	#[test]
	fn short_widgets_get_a_zero_height_plot() {
		let (_, _, adapter) = setup(Geometry::new(200.0, 30.0));
		let config = adapter.configure(&ChartInput::default()).unwrap();
		assert_eq!(config.size(), Some(ChartSize { width: 200.0, height: 0.0 }));
	}

	#[test]
	fn non_object_input_is_rejected() {
		assert!(ChartInput::from_value(json!([1, 2, 3])).is_err());
	}
}

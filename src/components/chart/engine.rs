use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::Serializer;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

use crate::error::VizError;
use crate::visualization::Margin;

/// A chart description in the engine's own format. The widget only adds
/// `size`, `padding` and, when missing, `bindto`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartInput(pub Map<String, Value>);

/// Plot size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSize {
	/// Width.
	pub width: f64,
	/// Height.
	pub height: f64,
}

impl ChartInput {
	/// Wrap a JSON value, which must be an object.
	pub fn from_value(value: Value) -> Result<Self, VizError> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			other => Err(VizError::Engine(format!("chart input must be an object, got {other}"))),
		}
	}

	/// Look up a top-level key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// The `size` entry, if set.
	pub fn size(&self) -> Option<ChartSize> {
		self.get("size").and_then(|v| serde_json::from_value(v.clone()).ok())
	}

	/// The `padding` entry, if set.
	pub fn padding(&self) -> Option<Margin> {
		self.get("padding").and_then(|v| serde_json::from_value(v.clone()).ok())
	}

	pub(crate) fn with_layout(mut self, size: ChartSize, padding: Margin, bindto: &str) -> Result<Self, VizError> {
		self.0
			.insert("size".into(), serde_json::to_value(size).map_err(VizError::Serialize)?);
		self.0
			.insert("padding".into(), serde_json::to_value(padding).map_err(VizError::Serialize)?);
		self.0
			.entry("bindto")
			.or_insert_with(|| Value::String(bindto.into()));
		Ok(self)
	}
}

/// A declarative charting engine.
pub trait ChartEngine {
	/// Render the chart described by `config`.
	fn generate(&mut self, config: &ChartInput) -> Result<(), VizError>;

	/// Release whatever the last `generate` left behind.
	fn destroy(&mut self) {}
}

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = c3, js_name = generate, catch)]
	fn c3_generate(config: &JsValue) -> Result<JsValue, JsValue>;
}

/// The C3 library loaded in the page as the global `c3`.
#[derive(Debug, Default)]
pub struct C3Engine {
	chart: Option<JsValue>,
}

impl C3Engine {
	/// An engine that has not generated anything yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// The chart object returned by the last `generate`.
	pub fn chart(&self) -> Option<&JsValue> {
		self.chart.as_ref()
	}
}

impl ChartEngine for C3Engine {
	fn generate(&mut self, config: &ChartInput) -> Result<(), VizError> {
		let config = config
			.serialize(&Serializer::json_compatible())
			.map_err(|err| VizError::Engine(err.to_string()))?;
		self.chart = Some(c3_generate(&config).map_err(VizError::engine)?);
		debug!("c3 chart generated");
		Ok(())
	}

	fn destroy(&mut self) {
		let Some(chart) = self.chart.take() else {
			return;
		};
		let destroy = js_sys::Reflect::get(&chart, &JsValue::from_str("destroy"))
			.ok()
			.and_then(|f| f.dyn_into::<js_sys::Function>().ok());
		match destroy.map(|f| f.call0(&chart)) {
			Some(Ok(_)) => debug!("c3 chart destroyed"),
			Some(Err(err)) => warn!("c3 chart destroy failed: {err:?}"),
			None => warn!("c3 chart has no destroy method"),
		}
	}
}

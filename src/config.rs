//! Widget configuration.
//!
//! Every field has a default matching the stock widget behavior, so a JSON
//! override only needs the keys it changes.

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Top-level configuration for both widgets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
	/// Id of the element the chart container is generated under.
	pub content_root_id: String,
	/// Chart widget settings.
	pub chart: ChartSettings,
	/// Graph widget settings.
	pub graph: GraphSettings,
}

impl Default for WidgetConfig {
	fn default() -> Self {
		Self {
			content_root_id: "content".into(),
			chart: ChartSettings::default(),
			graph: GraphSettings::default(),
		}
	}
}

impl WidgetConfig {
	/// Parse a (possibly partial) JSON configuration.
	pub fn from_json(source: &str) -> Result<Self, VizError> {
		serde_json::from_str(source).map_err(VizError::Config)
	}
}

/// Chart widget settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
	/// Name (id and class) of the generated container.
	pub container: String,
	/// Vertical space reserved below the plot for the legend.
	pub legend_margin: f64,
}

impl Default for ChartSettings {
	fn default() -> Self {
		Self {
			container: "chart".into(),
			legend_margin: 40.0,
		}
	}
}

/// Offset of a node label from its node center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelOffset {
	/// Horizontal offset.
	pub dx: f64,
	/// Vertical offset.
	pub dy: f64,
}

/// Graph widget settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
	/// Name (id and class) of the generated container.
	pub container: String,
	/// Link distance is `min(width, height) / link_distance_divisor`.
	pub link_distance_divisor: f64,
	/// Radius of node circles.
	pub node_radius: f64,
	/// Label position relative to the node.
	pub label_offset: LabelOffset,
	/// Fill color of node labels.
	pub label_fill: String,
	/// Seconds advanced per animation frame.
	pub frame_dt: f32,
	/// Layout engine parameters.
	pub simulation: SimulationSettings,
}

impl Default for GraphSettings {
	fn default() -> Self {
		Self {
			container: "graph".into(),
			link_distance_divisor: 6.5,
			node_radius: 5.0,
			label_offset: LabelOffset { dx: 7.0, dy: -4.0 },
			label_fill: "black".into(),
			frame_dt: 0.016,
			simulation: SimulationSettings::default(),
		}
	}
}

/// Parameters handed to the force layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
	/// Spring constant along links.
	pub force_spring: f32,
	/// Upper bound on any single force.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity damping per step.
	pub damping_factor: f32,
	/// Mass given to every node.
	pub node_mass: f32,
	/// Cooling factor applied to `alpha` after each step.
	pub alpha_decay: f64,
	/// The layout stops once `alpha` drops below this.
	pub alpha_min: f64,
}

impl Default for SimulationSettings {
	fn default() -> Self {
		Self {
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			alpha_decay: 0.99,
			alpha_min: 0.005,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_stock_widgets() {
		let config = WidgetConfig::default();
		assert_eq!(config.content_root_id, "content");
		assert_eq!(config.chart.legend_margin, 40.0);
		assert_eq!(config.graph.link_distance_divisor, 6.5);
		assert_eq!(config.graph.node_radius, 5.0);
		assert_eq!(config.graph.label_offset, LabelOffset { dx: 7.0, dy: -4.0 });
	}

	#[test]
	fn partial_json_overrides_only_named_keys() {
		let config =
			WidgetConfig::from_json(r#"{"chart": {"legend_margin": 25}, "graph": {"simulation": {"alpha_min": 0.1}}}"#)
				.unwrap();
		assert_eq!(config.chart.legend_margin, 25.0);
		assert_eq!(config.chart.container, "chart");
		assert_eq!(config.graph.simulation.alpha_min, 0.1);
		assert_eq!(config.graph.simulation.alpha_decay, 0.99);
	}

	#[test]
	fn malformed_json_is_a_config_error() {
		let err = WidgetConfig::from_json("{").unwrap_err();
		assert!(matches!(err, VizError::Config(_)));
	}
}

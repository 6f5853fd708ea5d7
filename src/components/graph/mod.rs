mod adapter;
mod animation;
mod layout;
mod scene;
mod types;

pub use adapter::{GraphAdapter, link_distance_for};
pub use animation::run_animation;
pub use layout::{ForceLayout, LayoutEngine, Point, TickListener};
pub use scene::{CirclePrimitive, GraphScene, LabelPrimitive, LinePrimitive, SvgElement};
pub use types::{Edge, GraphInput, Link, NodeRef, Vertex};

//! The widgets.

/// Chart widget: hands chart descriptions to C3.
pub mod chart;
/// Graph widget: SVG force-directed layout of vertices and edges.
pub mod graph;

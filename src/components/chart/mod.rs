mod adapter;
mod engine;

pub use adapter::ChartAdapter;
pub use engine::{C3Engine, ChartEngine, ChartInput, ChartSize};

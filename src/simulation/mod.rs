//! Path generation and Monte Carlo aggregation

mod engine;
mod path;
mod result;

pub use engine::{CancelToken, SimulationEngine, PATH_BATCH_SIZE};
pub use path::{simulate_path, Path};
pub use result::SimulationResult;

//! Projection engine for multi-year ROI projections

mod state;
mod engine;
mod records;
pub mod rates;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, compute_projection};
pub use records::{Projection, Summary, YearRecord};
pub use rates::RateBasis;

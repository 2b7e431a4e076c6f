//! School ROI - multi-year return-on-investment projections for AI tools in schools
//!
//! This library provides:
//! - Typed assumptions with defaults, normalization and validation
//! - A pure year-by-year projection engine (benefits, costs, NPV, payback)
//! - Rounded wire-format reports
//! - Batch scenario and adoption sensitivity runs
//! - HTTP routing for the calculator API

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod report;
pub mod scenario;
pub mod api;

// Re-export commonly used types
pub use error::{Result, RoiError};
pub use assumptions::{Assumptions, AssumptionsInput, AdoptionSchedule, PricingMode};
pub use projection::{compute_projection, Projection, ProjectionEngine, Summary, YearRecord};
pub use report::{calculate, RoiReport};
pub use scenario::ScenarioRunner;

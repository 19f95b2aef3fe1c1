//! Release classification and per-die trajectory planning.

pub mod classifier;
pub mod planner;

pub use classifier::{classify, ThrowIntent};
pub use planner::{DieFlightPlan, ThrowPlanner};

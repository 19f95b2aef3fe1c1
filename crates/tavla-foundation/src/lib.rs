//! Gesture-driven throw input for the Tavla dice engine.
//!
//! Raw pointer events flow through the [`GestureSampler`], whose release
//! velocity is turned into a [`ThrowIntent`] by [`classify`] and, for a
//! confirmed throw, into per-die [`DieFlightPlan`]s by the [`ThrowPlanner`].

pub mod config;
pub mod gesture;
pub mod input;
pub mod throw;
pub mod throw_constants;

pub use config::{ConfigError, DistanceBand, ThrowConfig};
pub use gesture::{GestureMove, GestureSampler, GestureSession, PointerSample};
pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use throw::{classify, DieFlightPlan, ThrowIntent, ThrowPlanner};

pub mod prelude {
    pub use crate::config::{DistanceBand, ThrowConfig};
    pub use crate::gesture::{GestureMove, GestureSampler};
    pub use crate::input::{PointerEvent, PointerEventKind, PointerId};
    pub use crate::throw::{classify, DieFlightPlan, ThrowIntent, ThrowPlanner};
}

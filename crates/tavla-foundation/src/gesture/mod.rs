pub mod sampler;

pub use sampler::{GestureMove, GestureSampler, GestureSession, PointerSample};

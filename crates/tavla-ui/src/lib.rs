//! Dice throw controller and game-facing models for Tavla.

mod board;
mod dice_throw;
mod draw;
mod session;

pub use board::{BoardError, BoardPoint, BoardPosition, Player, PointShade, Quadrant, StackView};
pub use dice_throw::{DiceThrow, DieIndex, DieVisualState};
pub use draw::{face_label, DiceDrawList, DiceDrawScope, DrawPrimitive, RenderError};
pub use session::{DieValueSource, GameSession, RandomDice, SessionError};

pub use tavla_foundation::{
    DieFlightPlan, DistanceBand, PointerEvent, PointerEventKind, ThrowConfig, ThrowIntent,
};
pub use tavla_ui_graphics::{GraphicsLayer, Point, Rect, Size, Velocity};

pub mod prelude {
    pub use crate::board::{BoardPosition, Player};
    pub use crate::dice_throw::{DiceThrow, DieIndex, DieVisualState};
    pub use crate::draw::{DiceDrawScope, RenderError};
    pub use crate::session::{DieValueSource, GameSession};
    pub use tavla_foundation::prelude::*;
    pub use tavla_ui_graphics::prelude::*;
}

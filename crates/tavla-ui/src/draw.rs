use std::fmt;

use tavla_ui_graphics::GraphicsLayer;

use crate::dice_throw::DieIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The backend has no visual for this die yet. The update is skipped and
    /// picked up again on the next frame.
    TargetNotMounted(DieIndex),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TargetNotMounted(die) => write!(f, "die {die:?} is not mounted"),
        }
    }
}

impl std::error::Error for RenderError {}

/// A visual backend for the dice: flat sprites, a 3D model, a terminal.
///
/// The controller owns every transform; backends only read what they are
/// handed here.
pub trait DiceDrawScope {
    fn draw_die(
        &mut self,
        die: DieIndex,
        layer: &GraphicsLayer,
        face: Option<u8>,
    ) -> Result<(), RenderError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPrimitive {
    pub die: DieIndex,
    pub layer: GraphicsLayer,
    pub face: Option<u8>,
}

/// Collects one frame's dice into a list of primitives.
#[derive(Default)]
pub struct DiceDrawList {
    primitives: Vec<DrawPrimitive>,
}

impl DiceDrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_primitives(self) -> Vec<DrawPrimitive> {
        self.primitives
    }
}

impl DiceDrawScope for DiceDrawList {
    fn draw_die(
        &mut self,
        die: DieIndex,
        layer: &GraphicsLayer,
        face: Option<u8>,
    ) -> Result<(), RenderError> {
        self.primitives.push(DrawPrimitive {
            die,
            layer: *layer,
            face,
        });
        Ok(())
    }
}

/// Text shown on a die face; a dash until a roll is revealed.
pub fn face_label(face: Option<u8>) -> String {
    match face {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

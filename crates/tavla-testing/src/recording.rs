use std::collections::HashSet;

use tavla_ui::{DiceDrawScope, DieIndex, DrawPrimitive, RenderError};
use tavla_ui_graphics::GraphicsLayer;

/// Draw scope that keeps every primitive it is handed.
///
/// Dice can be unmounted to exercise the skip path of a missing visual.
#[derive(Default)]
pub struct RecordingDrawScope {
    primitives: Vec<DrawPrimitive>,
    unmounted: HashSet<DieIndex>,
    skipped: usize,
}

impl RecordingDrawScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmount(&mut self, die: DieIndex) {
        self.unmounted.insert(die);
    }

    pub fn mount(&mut self, die: DieIndex) {
        self.unmounted.remove(&die);
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    /// Most recent primitive recorded for `die`.
    pub fn last_for(&self, die: DieIndex) -> Option<&DrawPrimitive> {
        self.primitives.iter().rev().find(|p| p.die == die)
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
        self.skipped = 0;
    }
}

impl DiceDrawScope for RecordingDrawScope {
    fn draw_die(
        &mut self,
        die: DieIndex,
        layer: &GraphicsLayer,
        face: Option<u8>,
    ) -> Result<(), RenderError> {
        if self.unmounted.contains(&die) {
            self.skipped += 1;
            return Err(RenderError::TargetNotMounted(die));
        }
        self.primitives.push(DrawPrimitive {
            die,
            layer: *layer,
            face,
        });
        Ok(())
    }
}

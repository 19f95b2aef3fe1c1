use tavla_ui_graphics::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform interrupted the contact (multi-touch conflict, blur).
    Cancel,
}

/// A press/move/release/cancel event from the pointer input source.
///
/// `position` is relative to the center of the dice container, so the rest
/// slot is the origin. Timestamps must not decrease within one contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub timestamp_millis: u64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, timestamp_millis: u64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            timestamp_millis,
        }
    }

    pub fn down(position: Point, timestamp_millis: u64) -> Self {
        Self::new(PointerEventKind::Down, position, timestamp_millis)
    }

    pub fn moved(position: Point, timestamp_millis: u64) -> Self {
        Self::new(PointerEventKind::Move, position, timestamp_millis)
    }

    pub fn up(position: Point, timestamp_millis: u64) -> Self {
        Self::new(PointerEventKind::Up, position, timestamp_millis)
    }

    pub fn cancel(position: Point, timestamp_millis: u64) -> Self {
        Self::new(PointerEventKind::Cancel, position, timestamp_millis)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }
}

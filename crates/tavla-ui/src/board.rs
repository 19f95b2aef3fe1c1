//! Checker occupancy of the 24 board points.
//!
//! Read-only for rendering. Move application belongs to rules logic, which
//! this crate does not implement.

use std::fmt;

pub const POINT_COUNT: usize = 24;
pub const CHECKERS_PER_PLAYER: u32 = 15;
/// Checkers drawn per stack before the rest collapse into a count.
pub const MAX_VISIBLE_CHECKERS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardPoint {
    pub id: u8,
    pub checker_count: u32,
    pub owner: Option<Player>,
}

impl BoardPoint {
    const fn empty(id: u8) -> Self {
        Self {
            id,
            checker_count: 0,
            owner: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.checker_count == 0
    }

    pub fn shade(&self) -> PointShade {
        if self.id % 2 == 0 {
            PointShade::Light
        } else {
            PointShade::Dark
        }
    }

    pub fn stack(&self) -> StackView {
        StackView {
            visible: self.checker_count.min(MAX_VISIBLE_CHECKERS),
            overflow: self.checker_count.saturating_sub(MAX_VISIBLE_CHECKERS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointShade {
    Light,
    Dark,
}

/// How a stack is drawn: up to [`MAX_VISIBLE_CHECKERS`] checkers, then `+n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackView {
    pub visible: u32,
    pub overflow: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Point ids in on-screen order, left to right.
    pub fn point_ids(self) -> [u8; 6] {
        match self {
            Quadrant::TopLeft => [18, 17, 16, 15, 14, 13],
            Quadrant::TopRight => [24, 23, 22, 21, 20, 19],
            Quadrant::BottomLeft => [1, 2, 3, 4, 5, 6],
            Quadrant::BottomRight => [7, 8, 9, 10, 11, 12],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    PointOutOfRange(u8),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::PointOutOfRange(id) => {
                write!(f, "point {id} is outside 1..={POINT_COUNT}")
            }
        }
    }
}

impl std::error::Error for BoardError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardPosition {
    points: [BoardPoint; POINT_COUNT],
}

impl BoardPosition {
    pub fn empty() -> Self {
        let mut points = [BoardPoint::empty(0); POINT_COUNT];
        for (index, point) in points.iter_mut().enumerate() {
            point.id = index as u8 + 1;
        }
        Self { points }
    }

    /// The standard opening position.
    pub fn standard() -> Self {
        const SETUP: [(u8, u32, Player); 8] = [
            (1, 2, Player::Two),
            (6, 5, Player::One),
            (8, 3, Player::One),
            (12, 5, Player::Two),
            (13, 5, Player::One),
            (17, 3, Player::Two),
            (19, 5, Player::Two),
            (24, 2, Player::One),
        ];

        let mut board = Self::empty();
        for (id, checker_count, owner) in SETUP {
            board.points[usize::from(id) - 1] = BoardPoint {
                id,
                checker_count,
                owner: Some(owner),
            };
        }
        board
    }

    pub fn point(&self, id: u8) -> Result<&BoardPoint, BoardError> {
        match id {
            1..=24 => Ok(&self.points[usize::from(id) - 1]),
            _ => Err(BoardError::PointOutOfRange(id)),
        }
    }

    pub fn points(&self) -> &[BoardPoint; POINT_COUNT] {
        &self.points
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> [BoardPoint; 6] {
        quadrant.point_ids().map(|id| self.points[usize::from(id) - 1])
    }

    pub fn checkers_of(&self, player: Player) -> u32 {
        self.points
            .iter()
            .filter(|point| point.owner == Some(player))
            .map(|point| point.checker_count)
            .sum()
    }
}

impl Default for BoardPosition {
    fn default() -> Self {
        Self::standard()
    }
}

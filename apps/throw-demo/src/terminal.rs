//! Text backend: the board once, then dice transforms through the log.

use tavla_ui::{
    face_label, BoardPoint, BoardPosition, DiceDrawScope, DieIndex, GraphicsLayer, Player,
    Quadrant, RenderError,
};

#[derive(Default)]
pub struct TerminalScope {
    frame: u64,
}

impl TerminalScope {
    pub fn next_frame(&mut self) {
        self.frame += 1;
    }
}

impl DiceDrawScope for TerminalScope {
    fn draw_die(
        &mut self,
        die: DieIndex,
        layer: &GraphicsLayer,
        face: Option<u8>,
    ) -> Result<(), RenderError> {
        log::debug!(
            "frame {:>4} {:?}: ({:>7.1}, {:>7.1}) rot {:>6.1}° tilt ({:>5.1}, {:>5.1}) scale {:.2} [{}]",
            self.frame,
            die,
            layer.translation_x,
            layer.translation_y,
            layer.rotation_z,
            layer.rotation_x,
            layer.rotation_y,
            layer.scale,
            face_label(face)
        );
        Ok(())
    }
}

fn cell(point: &BoardPoint) -> String {
    let stack = point.stack();
    let owner = match point.owner {
        Some(Player::One) => "o",
        Some(Player::Two) => "x",
        None => ".",
    };
    let checkers = owner.repeat(stack.visible.max(1) as usize);
    if stack.overflow > 0 {
        format!("{checkers}+{}", stack.overflow)
    } else {
        checkers
    }
}

fn row(board: &BoardPosition, left: Quadrant, right: Quadrant) -> (String, String) {
    let ids = left
        .point_ids()
        .into_iter()
        .chain(right.point_ids())
        .map(|id| format!("{id:>7}"))
        .collect::<String>();
    let cells = board
        .quadrant(left)
        .iter()
        .chain(board.quadrant(right).iter())
        .map(|point| format!("{:>7}", cell(point)))
        .collect::<String>();
    (ids, cells)
}

pub fn print_board(board: &BoardPosition) {
    let (top_ids, top) = row(board, Quadrant::TopLeft, Quadrant::TopRight);
    let (bottom_ids, bottom) = row(board, Quadrant::BottomLeft, Quadrant::BottomRight);
    println!("{top_ids}");
    println!("{top}");
    println!();
    println!("{bottom}");
    println!("{bottom_ids}");
}

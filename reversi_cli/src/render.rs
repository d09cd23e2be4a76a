//! 盤面と通知のテキスト表示。

use reversi_core::engine;
use std::io::{self, Write};

/// 盤面を文字で描く。`hints` のマスは `*` で示す。
pub fn draw_board(board: &engine::Board, board_size: u8, hints: &[engine::Coord]) -> String {
    let mut out = String::from("   ");
    for x in 0..board_size {
        out.push_str(&format!("{:>2}", x));
    }
    out.push('\n');

    for y in 0..board_size {
        out.push_str(&format!("{:>2} ", y));
        for x in 0..board_size {
            let coord = engine::Coord::new(x, y);
            let mark = match board.get(coord) {
                Some(engine::Piece::Black) => 'X',
                Some(engine::Piece::White) => 'O',
                None if hints.contains(&coord) => '*',
                None => '.',
            };
            out.push(' ');
            out.push(mark);
        }
        out.push('\n');
    }

    out
}

/// 通知を1行ずつ書き出す `Observer`。
#[derive(Debug)]
pub struct Transcript<W> {
    /// 書き込み先。
    out: W,
    /// 最初の書き込みエラー。
    error: Option<io::Error>,
}

impl<W: Write> Transcript<W> {
    /// 書き込み先を指定して作る。
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// 書き込み先を返す。
    pub const fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// 書き込み中に起きた最初のエラーを取り出す。
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

/// 通知を1行の文字列にする。
pub fn describe(event: &engine::GameEvent) -> String {
    match event {
        engine::GameEvent::Board(change) => match change {
            engine::BoardEvent::Placed { coord, piece } => format!("{piece} plays {coord}"),
            engine::BoardEvent::Flipped { coord, piece } => format!("  {coord} flips to {piece}"),
            _ => format!("  {} is now {}", change.coord(), change.piece()),
        },
        engine::GameEvent::GameOver(outcome) => format!("Game over: {outcome}"),
        engine::GameEvent::Passed(piece) => format!("{piece} has no legal move and passes"),
        engine::GameEvent::Reset => "New game".to_owned(),
        engine::GameEvent::TurnChanged(piece) => format!("{piece} to move"),
        _ => format!("{event:?}"),
    }
}

impl<W: Write> engine::event::Observer for Transcript<W> {
    fn notify(&mut self, event: &engine::GameEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", describe(event)) {
            self.error = Some(err);
        }
    }
}

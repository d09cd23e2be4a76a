use crate::engine::types::{Coord, Piece};
use core::cmp::Ordering;
use core::fmt;

/// 着手によって生じた盤面の変化。
///
/// `Engine::apply_play` は着手（`Placed`）を先頭に、続けて反転（`Flipped`）を
/// 方向の走査順・各方向の近い順に並べて返す。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum BoardEvent {
    /// 反転した石（変化後の色）。
    Flipped {
        /// 反転したマス。
        coord: Coord,
        /// 反転後の色。
        piece: Piece,
    },
    /// 新しく置かれた石。
    Placed {
        /// 置かれたマス。
        coord: Coord,
        /// 置かれた色。
        piece: Piece,
    },
}

impl BoardEvent {
    /// 変化したマスを返す。
    #[inline]
    #[must_use]
    pub const fn coord(self) -> Coord {
        match self {
            Self::Flipped { coord, .. } | Self::Placed { coord, .. } => coord,
        }
    }

    /// 変化後の色を返す。
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match self {
            Self::Flipped { piece, .. } | Self::Placed { piece, .. } => piece,
        }
    }
}

/// 黒だけが最多。
const BLACK_ONLY: [Piece; 1] = [Piece::Black];
/// 黒白が同数。
const BOTH: [Piece; 2] = Piece::ALL;
/// 白だけが最多。
const WHITE_ONLY: [Piece; 1] = [Piece::White];

/// 終局時の集計結果。
///
/// 最多石数に並んだ色はすべて勝者とする。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Outcome {
    /// 黒の石数。
    black: u32,
    /// 白の石数。
    white: u32,
}

impl Outcome {
    /// 黒の石数を返す。
    #[inline]
    #[must_use]
    pub const fn black(&self) -> u32 {
        self.black
    }

    /// 指定色の石数を返す。
    #[inline]
    #[must_use]
    pub const fn count(&self, piece: Piece) -> u32 {
        match piece {
            Piece::Black => self.black,
            Piece::White => self.white,
        }
    }

    /// 石数から結果を作る。
    #[inline]
    #[must_use]
    pub const fn from_counts(black: u32, white: u32) -> Self {
        Self { black, white }
    }

    /// 引き分けかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_tie(&self) -> bool {
        self.black == self.white
    }

    /// 白の石数を返す。
    #[inline]
    #[must_use]
    pub const fn white(&self) -> u32 {
        self.white
    }

    /// 単独の勝者を返す（引き分けなら `None`）。
    #[inline]
    #[must_use]
    pub fn winner(&self) -> Option<Piece> {
        match self.black.cmp(&self.white) {
            Ordering::Greater => Some(Piece::Black),
            Ordering::Less => Some(Piece::White),
            Ordering::Equal => None,
        }
    }

    /// 勝者の一覧（黒、白の順）を返す。
    #[inline]
    #[must_use]
    pub fn winners(&self) -> &'static [Piece] {
        match self.winner() {
            Some(Piece::Black) => &BLACK_ONLY,
            Some(Piece::White) => &WHITE_ONLY,
            None => &BOTH,
        }
    }
}

impl fmt::Display for Outcome {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.winner() {
            Some(winner) => format!("{winner} wins!"),
            None => {
                let names: Vec<String> = self.winners().iter().map(ToString::to_string).collect();
                format!("{} tie.", names.join(" and "))
            }
        };
        write!(formatter, "{verdict} (B={} W={})", self.black, self.white)
    }
}

/// `GameSession` が発行する通知。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum GameEvent {
    /// 盤面の変化（着手・反転）。
    Board(BoardEvent),
    /// 終局。
    GameOver(Outcome),
    /// 合法手が無く、指定色がパスした。
    Passed(Piece),
    /// 盤面が初期配置に戻された。
    Reset,
    /// 手番が指定色に移った。
    TurnChanged(Piece),
}

/// `GameEvent` を受け取る側（描画・演出など）。
pub trait Observer {
    /// 通知を1件受け取る。
    fn notify(&mut self, event: &GameEvent);
}

impl Observer for Vec<GameEvent> {
    #[inline]
    fn notify(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

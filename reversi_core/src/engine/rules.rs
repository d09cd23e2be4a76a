use crate::engine::board::Board;
use crate::engine::event::BoardEvent;
use crate::engine::types::{Coord, Piece};

/// 走査する8方向（`(dx, dy)`）。合法判定と反転処理で同じ順序を使う。
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// 盤の一辺の最小値。
const MIN_BOARD_SIZE: u8 = 2;

/// 盤の大きさが不正。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("board size must be at least 2, got {size}")]
pub struct BoardSizeError {
    /// 指定された大きさ。
    pub size: u8,
}

/// 合法でない着手を適用しようとした。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{color} cannot play at {coord}")]
pub struct IllegalMoveError {
    /// 手番の色。
    pub color: Piece,
    /// 指定されたマス。
    pub coord: Coord,
}

/// 合法手判定・着手適用を行うルールエンジン。
///
/// 状態は盤の大きさだけで、盤面は呼び出しごとに受け取る。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Engine {
    /// 盤の一辺の長さ。
    board_size: u8,
}

impl Engine {
    /// 着手を適用する（置石と反転）。
    ///
    /// 事前に `is_legal_play` で合法であることを確認しておくこと。
    /// 合法でない座標に対しては検証せずにそのまま置くため、盤面は意味のない
    /// 状態になる。検証が必要なら `try_apply_play` を使う。
    ///
    /// 戻り値は置石を先頭に、反転を方向の走査順に並べた変化の列。
    #[inline]
    pub fn apply_play(&self, board: &mut Board, color: Piece, coord: Coord) -> Vec<BoardEvent> {
        let mut events = vec![BoardEvent::Placed {
            coord,
            piece: color,
        }];
        board.insert(coord, color);

        let mut to_flip = Vec::new();
        for (dx, dy) in DIRECTIONS {
            to_flip.clear();
            let mut cursor = coord;

            for _ in u8::MIN..self.board_size {
                let Some(next) = self.step(cursor, dx, dy) else {
                    break;
                };
                cursor = next;

                match board.get(cursor) {
                    None => break,
                    Some(piece) if piece != color => to_flip.push(cursor),
                    Some(_) => {
                        for flipped in &to_flip {
                            board.insert(*flipped, color);
                            events.push(BoardEvent::Flipped {
                                coord: *flipped,
                                piece: color,
                            });
                        }
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            %color,
            %coord,
            flipped = events.len().saturating_sub(1),
            "applied play"
        );
        events
    }

    /// 盤の一辺の長さを返す。
    #[inline]
    #[must_use]
    pub const fn board_size(&self) -> u8 {
        self.board_size
    }

    /// 1方向について、相手の石を挟めるかを返す。
    fn brackets(&self, board: &Board, color: Piece, coord: Coord, dx: i8, dy: i8) -> bool {
        let mut saw_other = false;
        let mut cursor = coord;

        for _ in u8::MIN..self.board_size {
            let Some(next) = self.step(cursor, dx, dy) else {
                return false;
            };
            cursor = next;

            match board.get(cursor) {
                None => return false,
                Some(piece) if piece != color => saw_other = true,
                Some(_) => return saw_other,
            }
        }

        false
    }

    /// 指定色に合法手が1つでもあるかを返す。
    #[inline]
    #[must_use]
    pub fn can_play(&self, board: &Board, color: Piece) -> bool {
        self.cells()
            .any(|coord| !board.contains(coord) && self.is_legal_play(board, color, coord))
    }

    /// 全マスを行優先の走査順で列挙する。
    fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (u8::MIN..self.board_size)
            .flat_map(move |y| (u8::MIN..self.board_size).map(move |x| Coord::new(x, y)))
    }

    /// 盤の範囲内かを返す。
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x() < self.board_size && coord.y() < self.board_size
    }

    /// 初期配置（中央4マス）の盤面を返す。
    #[inline]
    #[must_use]
    pub fn initial_board(&self) -> Board {
        let mut board = Board::new();
        self.reset(&mut board);
        board
    }

    /// 指定色が指定マスに打てるかを返す。
    ///
    /// 範囲外や既に石があるマスは常に `false`。盤面は変更しない。
    #[inline]
    #[must_use]
    pub fn is_legal_play(&self, board: &Board, color: Piece, coord: Coord) -> bool {
        if !self.in_bounds(coord) || board.contains(coord) {
            return false;
        }

        DIRECTIONS
            .into_iter()
            .any(|(dx, dy)| self.brackets(board, color, coord, dx, dy))
    }

    /// 指定色の合法手を行優先（y が外側、x が内側）の走査順で返す。
    #[inline]
    #[must_use]
    pub fn legal_plays(&self, board: &Board, color: Piece) -> Vec<Coord> {
        self.cells()
            .filter(|coord| !board.contains(*coord))
            .filter(|coord| self.is_legal_play(board, color, *coord))
            .collect()
    }

    /// 盤の大きさを指定して初期化する。
    ///
    /// # Errors
    ///
    /// `board_size` が2未満の場合、`BoardSizeError` を返す。
    #[inline]
    pub const fn new(board_size: u8) -> Result<Self, BoardSizeError> {
        if board_size < MIN_BOARD_SIZE {
            return Err(BoardSizeError { size: board_size });
        }

        Ok(Self { board_size })
    }

    /// 盤面を消去し、中央4マスに初期配置を置く。
    #[inline]
    pub fn reset(&self, board: &mut Board) {
        board.clear();

        let half = match self.board_size.checked_div(2) {
            Some(value) => value,
            None => u8::MIN,
        };
        let low = half.saturating_sub(1);
        board.insert(Coord::new(low, low), Piece::White);
        board.insert(Coord::new(half, low), Piece::Black);
        board.insert(Coord::new(low, half), Piece::Black);
        board.insert(Coord::new(half, half), Piece::White);
    }

    /// 1マス進める。盤外に出る場合は `None`。
    fn step(&self, coord: Coord, dx: i8, dy: i8) -> Option<Coord> {
        coord.offset(dx, dy).filter(|next| self.in_bounds(*next))
    }

    /// 合法性を確認してから着手を適用する。
    ///
    /// # Errors
    ///
    /// 合法手でない場合、盤面を変更せずに `IllegalMoveError` を返す。
    #[inline]
    pub fn try_apply_play(
        &self,
        board: &mut Board,
        color: Piece,
        coord: Coord,
    ) -> Result<Vec<BoardEvent>, IllegalMoveError> {
        if !self.is_legal_play(board, color, coord) {
            return Err(IllegalMoveError { color, coord });
        }

        Ok(self.apply_play(board, color, coord))
    }
}

use crate::engine::board::Board;
use crate::engine::event::{BoardEvent, GameEvent, Observer, Outcome};
use crate::engine::rules::{BoardSizeError, Engine, IllegalMoveError};
use crate::engine::types::{Coord, Piece};
use core::mem;

/// ゲームの進行状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Phase {
    /// 終局（双方が続けて打てなかった）。
    Ended(Outcome),
    /// 進行中。
    InProgress {
        /// 手番の色。
        current: Piece,
        /// 直前の手番が合法手なしでパスしたか。
        last_player_passed: bool,
    },
}

/// 手番の判定結果。
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Decision {
    /// 終局した。
    Ended(Outcome),
    /// `color` が `plays`（走査順）から1手を選ぶ必要がある。
    Play {
        /// 手番の色。
        color: Piece,
        /// 合法手。
        plays: Vec<Coord>,
    },
}

/// 着手に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlayError {
    /// すでに終局している。
    #[error("game is already over")]
    GameOver,
    /// 指定マスが合法手ではない。
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),
}

/// 1ゲーム分の盤面・手番・通知を管理する。
///
/// 盤面はこの構造体だけが所有し、`Engine` には呼び出しごとに渡す。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameSession {
    /// 現在の盤面。
    board: Board,
    /// ルールエンジン。
    engine: Engine,
    /// 未配信の通知。
    events: Vec<GameEvent>,
    /// 進行状態。
    phase: Phase,
}

impl GameSession {
    /// 現在の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// 現手番を返す（終局後は `None`）。
    #[inline]
    #[must_use]
    pub const fn current_color(&self) -> Option<Piece> {
        match self.phase {
            Phase::InProgress { current, .. } => Some(current),
            Phase::Ended(_) => None,
        }
    }

    /// 打つ手がある手番まで進め、その合法手を返す。
    ///
    /// 手番に合法手が無ければパスして相手に移り、直前もパスだった場合は
    /// 終局する。合法手を返した後は `play` が呼ばれるまで状態を変えない。
    #[inline]
    pub fn decide(&mut self) -> Decision {
        loop {
            let (current, last_player_passed) = match self.phase {
                Phase::Ended(outcome) => return Decision::Ended(outcome),
                Phase::InProgress {
                    current,
                    last_player_passed,
                } => (current, last_player_passed),
            };

            let plays = self.engine.legal_plays(&self.board, current);
            if !plays.is_empty() {
                self.phase = Phase::InProgress {
                    current,
                    last_player_passed: false,
                };
                tracing::trace!(color = %current, count = plays.len(), "awaiting play");
                return Decision::Play {
                    color: current,
                    plays,
                };
            }

            if last_player_passed {
                self.finish();
                continue;
            }

            tracing::debug!(color = %current, "no legal play, passing");
            self.events.push(GameEvent::Passed(current));
            self.switch_turn(current.next(), true);
        }
    }

    /// ルールエンジンを返す。
    #[inline]
    #[must_use]
    pub const fn engine(&self) -> Engine {
        self.engine
    }

    /// 石数を集計して終局させる。
    fn finish(&mut self) {
        let (black, white) = self.board.counts();
        let outcome = Outcome::from_counts(black, white);
        tracing::info!(black, white, tie = outcome.is_tie(), "game over");

        self.events.push(GameEvent::GameOver(outcome));
        self.phase = Phase::Ended(outcome);
    }

    /// 未配信の通知を `observer` へ順に渡す。
    #[inline]
    pub fn flush_to<O: Observer + ?Sized>(&mut self, observer: &mut O) {
        for event in self.events.drain(..) {
            observer.notify(&event);
        }
    }

    /// 任意の盤面・手番から開始する。通知は発行しない。
    ///
    /// 盤面の石はすべて `engine` の範囲内であること。
    #[inline]
    #[must_use]
    pub const fn from_position(engine: Engine, board: Board, to_move: Piece) -> Self {
        Self {
            board,
            engine,
            events: Vec::new(),
            phase: Phase::InProgress {
                current: to_move,
                last_player_passed: false,
            },
        }
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Ended(_))
    }

    /// 現手番の合法手を返す（終局後は空）。
    #[inline]
    #[must_use]
    pub fn legal_plays(&self) -> Vec<Coord> {
        self.current_color()
            .map(|color| self.engine.legal_plays(&self.board, color))
            .unwrap_or_default()
    }

    /// 初期局面からゲームを開始し、黒への手番通知を積む。
    ///
    /// # Errors
    ///
    /// `board_size` が2未満の場合、`BoardSizeError` を返す。
    #[inline]
    pub fn new(board_size: u8) -> Result<Self, BoardSizeError> {
        let engine = match Engine::new(board_size) {
            Ok(value) => value,
            Err(err) => return Err(err),
        };

        let mut session = Self::from_position(engine, engine.initial_board(), Piece::Black);
        session.events.push(GameEvent::TurnChanged(Piece::Black));
        Ok(session)
    }

    /// 終局結果を返す（進行中は `None`）。
    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome),
            Phase::InProgress { .. } => None,
        }
    }

    /// 進行状態を返す。
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// 現手番として指定マスに打ち、手番を相手に移す。
    ///
    /// # Errors
    ///
    /// 次の場合に盤面・手番を変えずにエラーを返す：
    /// - `PlayError::GameOver`: すでに終局している場合
    /// - `PlayError::IllegalMove`: 指定マスが合法手でない場合
    #[inline]
    pub fn play(&mut self, coord: Coord) -> Result<Vec<BoardEvent>, PlayError> {
        let Phase::InProgress { current, .. } = self.phase else {
            return Err(PlayError::GameOver);
        };

        let changes = match self.engine.try_apply_play(&mut self.board, current, coord) {
            Ok(value) => value,
            Err(err) => return Err(PlayError::IllegalMove(err)),
        };
        self.events
            .extend(changes.iter().copied().map(GameEvent::Board));
        self.switch_turn(current.next(), false);

        Ok(changes)
    }

    /// 盤面を初期配置に戻し、黒番から再開する。終局後でもよい。
    #[inline]
    pub fn reset(&mut self) {
        self.engine.reset(&mut self.board);
        self.events.push(GameEvent::Reset);
        self.switch_turn(Piece::Black, false);
        tracing::info!(board_size = self.engine.board_size(), "game reset");
    }

    /// 手番を `next` に移す。
    fn switch_turn(&mut self, next: Piece, passed: bool) {
        self.phase = Phase::InProgress {
            current: next,
            last_player_passed: passed,
        };
        self.events.push(GameEvent::TurnChanged(next));
    }

    /// 未配信の通知をすべて取り出す。
    #[inline]
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }
}

/// 盤面（座標から石への対応）。
pub mod board;
/// 盤面変化・進行の通知と終局結果。
pub mod event;
/// ゲーム進行（手番、パス、終局判定）の実装。
pub mod game;
/// 合法手判定と着手適用の実装。
pub mod rules;
pub mod types;

pub type Board = board::Board;
pub type BoardEvent = event::BoardEvent;
pub type Coord = types::Coord;
pub type Decision = game::Decision;
pub type Engine = rules::Engine;
pub type GameEvent = event::GameEvent;
pub type GameSession = game::GameSession;
pub type Outcome = event::Outcome;
pub type Phase = game::Phase;
pub type Piece = types::Piece;
pub type PlayError = game::PlayError;

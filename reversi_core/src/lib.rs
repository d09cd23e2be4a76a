//! Reversi (Othello) rules engine.
//!
//! このクレートは N×N 盤のルール（合法手判定、着手と反転、終局判定）と
//! ゲーム進行を管理する `engine` を提供します。
//! 描画や入力は利用側（`reversi_cli` など）が担い、`GameEvent` を受け取って反映します。

#![forbid(unsafe_code)]

/// ゲームルール・盤面・進行を提供するモジュール。
pub mod engine;

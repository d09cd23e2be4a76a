//! 端末で動作する最小 UI。

mod config;
mod render;

use config::{Config, ConfigError, LogFormat};
use render::Transcript;
use reversi_core::engine;
use std::io::{self, BufRead, Write};

/// 実行時のエラー。
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// 引数が不正。
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 入出力に失敗した。
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    /// ログの初期化に失敗した。
    #[error("failed to install log subscriber: {0}")]
    Logging(String),
    /// 着手に失敗した。
    #[error(transparent)]
    Session(#[from] engine::game::PlayError),
    /// 盤の大きさが不正。
    #[error(transparent)]
    Size(#[from] engine::rules::BoardSizeError),
}

/// 手番ごとの操作者。
#[derive(Debug)]
enum Controller {
    /// 走査順で最初の合法手を選ぶ。
    FirstPlay,
    /// 標準入力から手を読む。
    Human,
}

/// 人間の入力。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Command {
    /// 指定マスに打つ。
    Play(engine::Coord),
    /// 終了する。
    Quit,
}

/// 対局と両者の操作者。
#[derive(Debug)]
struct App {
    /// 黒の操作者。
    black: Controller,
    /// 進行中の対局。
    session: engine::GameSession,
    /// 白の操作者。
    white: Controller,
}

impl App {
    fn controller_for(&self, color: engine::Piece) -> &Controller {
        match color {
            engine::Piece::Black => &self.black,
            engine::Piece::White => &self.white,
        }
    }

    fn is_automatic(&self) -> bool {
        matches!(self.black, Controller::FirstPlay) && matches!(self.white, Controller::FirstPlay)
    }

    fn new(config: &Config) -> Result<Self, CliError> {
        let controller = || {
            if config.auto {
                Controller::FirstPlay
            } else {
                Controller::Human
            }
        };

        Ok(Self {
            black: controller(),
            session: engine::GameSession::new(config.board_size)?,
            white: controller(),
        })
    }

    /// 1局を終局（または中断）まで進める。中断された場合は `false`。
    fn play_game<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<bool, CliError> {
        let board_size = self.session.engine().board_size();
        let mut transcript = Transcript::new(&mut *out);

        loop {
            let decision = self.session.decide();
            self.session.flush_to(&mut transcript);
            if let Some(err) = transcript.take_error() {
                return Err(err.into());
            }

            let (color, plays) = match decision {
                engine::Decision::Play { color, plays } => (color, plays),
                engine::Decision::Ended(_) => return Ok(true),
                _ => return Ok(true),
            };

            let coord = match self.controller_for(color) {
                Controller::FirstPlay => match plays.first() {
                    Some(first) => *first,
                    None => return Ok(true),
                },
                Controller::Human => {
                    let board = render::draw_board(self.session.board(), board_size, &plays);
                    match read_command(input, &mut transcript, &board, color, &plays)? {
                        Some(Command::Play(coord)) => coord,
                        Some(Command::Quit) | None => return Ok(false),
                    }
                }
            };

            self.session.play(coord)?;
        }
    }

    /// 終局ごとに結果を表示し、人間が操作する場合は再戦を尋ねる。
    fn run_games<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<(), CliError> {
        loop {
            if !self.play_game(input, out)? {
                return Ok(());
            }

            let board_size = self.session.engine().board_size();
            write!(out, "{}", render::draw_board(self.session.board(), board_size, &[]))?;
            if let Some(outcome) = self.session.outcome() {
                writeln!(out, "{outcome}")?;
            }
            if self.is_automatic() {
                return Ok(());
            }

            write!(out, "Play again? [y/N] ")?;
            out.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            if !line.trim().eq_ignore_ascii_case("y") {
                return Ok(());
            }
            self.session.reset();
        }
    }
}

/// 手番の入力を読む。合法手が入力されるまで繰り返す。入力終端では `None`。
fn read_command<R: BufRead, W: Write>(
    input: &mut R,
    transcript: &mut Transcript<W>,
    board: &str,
    color: engine::Piece,
    plays: &[engine::Coord],
) -> Result<Option<Command>, CliError> {
    let out = transcript.writer();
    write!(out, "{board}")?;

    loop {
        write!(out, "{color} (x y, or q to quit)> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_command(&line) {
            Some(Command::Play(coord)) if !plays.contains(&coord) => {
                writeln!(out, "{coord} is not a legal move")?;
            }
            Some(command) => return Ok(Some(command)),
            None => writeln!(out, "enter a move as two numbers, e.g. \"2 3\"")?,
        }
    }
}

/// 1行の入力を解釈する（`x y` / `x,y` / `q`）。
fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Some(Command::Quit);
    }

    let mut parts = trimmed
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|part| !part.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(Command::Play(engine::Coord::new(x, y)))
}

/// ログ出力（stderr）を設定する。
fn init_tracing(config: &Config) -> Result<(), CliError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_writer(io::stderr);

    let installed = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|err| CliError::Logging(err.to_string()))
}

fn run(config: &Config) -> Result<(), CliError> {
    init_tracing(config)?;
    tracing::info!(board_size = config.board_size, auto = config.auto, "starting");

    let mut app = App::new(config)?;
    app.run_games(&mut io::stdin().lock(), &mut io::stdout().lock())
}

fn main() -> Result<(), CliError> {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(value) => value,
        Err(ConfigError::Help) => {
            println!("{}", config::USAGE);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    run(&config)
}

#[cfg(test)]
mod tests {
    use super::{App, Command, parse_command};
    use crate::config::Config;
    use reversi_core::engine;
    use test_case::test_case;

    #[test_case("2 3", Some(Command::Play(engine::Coord::new(2, 3))); "space separated")]
    #[test_case(" 4,5\n", Some(Command::Play(engine::Coord::new(4, 5))); "comma separated")]
    #[test_case("q", Some(Command::Quit); "quit")]
    #[test_case("QUIT", Some(Command::Quit); "quit upper case")]
    #[test_case("-1 3", None; "negative")]
    #[test_case("1 2 3", None; "too many numbers")]
    #[test_case("d3", None; "letters")]
    fn parses_commands(line: &str, expected: Option<Command>) {
        assert_eq!(parse_command(line), expected);
    }

    fn app(config: &Config) -> App {
        match App::new(config) {
            Ok(value) => value,
            Err(err) => panic!("app must build, got={err:?}"),
        }
    }

    /// 黒石1つだけの、双方とも打てない 4×4 の局面。
    fn stalled_session() -> engine::GameSession {
        let rules = match engine::Engine::new(4) {
            Ok(value) => value,
            Err(err) => panic!("engine must build, got={err:?}"),
        };
        let board = [(engine::Coord::new(0, 0), engine::Piece::Black)]
            .into_iter()
            .collect();
        engine::GameSession::from_position(rules, board, engine::Piece::Black)
    }

    #[test]
    fn automatic_game_runs_to_the_end() {
        let config = Config {
            auto: true,
            board_size: 6,
            ..Config::default()
        };
        let mut app = match App::new(&config) {
            Ok(value) => value,
            Err(err) => panic!("app must build, got={err:?}"),
        };
        let mut input: &[u8] = &[];
        let mut out = Vec::new();

        let finished = app.play_game(&mut input, &mut out);

        assert!(matches!(finished, Ok(true)), "got={finished:?}");
        assert!(app.session.is_over());
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Black plays (2, 1)"), "transcript={text}");
        assert!(text.trim_end().ends_with(')'), "transcript={text}");
        assert!(text.contains("Game over: "), "transcript={text}");
    }

    #[test]
    fn human_game_retries_illegal_input_and_quits() {
        let config = Config {
            board_size: 4,
            ..Config::default()
        };
        let mut app = match App::new(&config) {
            Ok(value) => value,
            Err(err) => panic!("app must build, got={err:?}"),
        };
        let mut input: &[u8] = b"0 0\nnonsense\n1 0\nq\n";
        let mut out = Vec::new();

        let finished = app.play_game(&mut input, &mut out);

        assert!(matches!(finished, Ok(false)), "got={finished:?}");
        assert_eq!(app.session.board().counts(), (4, 1));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("(0, 0) is not a legal move"), "transcript={text}");
        assert!(text.contains("Black plays (1, 0)"), "transcript={text}");
        assert!(text.contains("White (x y, or q to quit)> "), "transcript={text}");
    }

    #[test]
    fn declining_a_rematch_keeps_the_final_board() {
        let mut app = app(&Config {
            board_size: 4,
            ..Config::default()
        });
        app.session = stalled_session();
        let mut input: &[u8] = b"n\n";
        let mut out = Vec::new();

        let result = app.run_games(&mut input, &mut out);

        assert!(result.is_ok(), "got={result:?}");
        assert!(app.session.is_over());
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Game over: Black wins! (B=1 W=0)"), "transcript={text}");
        assert!(text.ends_with("Play again? [y/N] "), "transcript={text}");
    }

    #[test]
    fn accepting_a_rematch_resets_and_quit_stops() {
        let mut app = app(&Config {
            board_size: 4,
            ..Config::default()
        });
        app.session = stalled_session();
        let mut input: &[u8] = b"y\nq\n";
        let mut out = Vec::new();

        let result = app.run_games(&mut input, &mut out);

        assert!(result.is_ok(), "got={result:?}");
        assert!(!app.session.is_over());
        assert_eq!(app.session.current_color(), Some(engine::Piece::Black));
        assert_eq!(app.session.board(), &app.session.engine().initial_board());
        let text = String::from_utf8_lossy(&out);
        let prompt = text.find("Play again? [y/N] ");
        let fresh = text.find("New game\nBlack to move\n");
        assert!(prompt.is_some() && fresh > prompt, "transcript={text}");
        assert!(text.trim_end().ends_with("Black (x y, or q to quit)>"), "transcript={text}");
    }

    #[test]
    fn automatic_run_does_not_offer_a_rematch() {
        let mut app = app(&Config {
            auto: true,
            board_size: 4,
            ..Config::default()
        });
        let mut input: &[u8] = &[];
        let mut out = Vec::new();

        let result = app.run_games(&mut input, &mut out);

        assert!(result.is_ok(), "got={result:?}");
        assert!(app.session.is_over());
        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("Black to move\n"), "transcript={text}");
        assert!(!text.contains("Play again"), "transcript={text}");
    }
}

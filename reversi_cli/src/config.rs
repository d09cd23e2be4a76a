//! コマンドライン引数から実行設定を読み取る。

use tracing::Level;

/// 盤の一辺の既定値。
pub const DEFAULT_BOARD_SIZE: u8 = 8;

/// 使い方の説明。
pub const USAGE: &str = "\
usage: reversi_cli [--size N] [--auto] [--log json|pretty] [--level LEVEL]

  --size N        board size (default 8)
  --auto          play the first legal move each turn instead of reading stdin
  --log FORMAT    log format on stderr: json or pretty (default pretty)
  --level LEVEL   max log level: error, warn, info, debug, trace (default info)
  --help          print this message";

/// ログの出力形式。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogFormat {
    /// 1行1件の JSON。
    Json,
    /// 人が読む形式。
    Pretty,
}

/// 実行設定。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// 両者とも走査順で最初の合法手を選ぶか。
    pub auto: bool,
    /// 盤の一辺の長さ。
    pub board_size: u8,
    /// ログの最大レベル。
    pub level: Level,
    /// ログの出力形式。
    pub log_format: LogFormat,
}

/// 引数の解釈に失敗した理由。
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `--help` が指定された。
    #[error("help requested")]
    Help,
    /// 値が不正。
    #[error("invalid value for {flag}: '{value}'")]
    InvalidValue {
        /// 対象のフラグ。
        flag: &'static str,
        /// 指定された値。
        value: String,
    },
    /// 値が無い。
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    /// 未知のフラグ。
    #[error("unknown argument: '{0}'")]
    Unknown(String),
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            auto: false,
            board_size: DEFAULT_BOARD_SIZE,
            level: Level::INFO,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// 引数（プログラム名を除く）から設定を作る。
    ///
    /// # Errors
    ///
    /// 未知のフラグや不正な値があれば `ConfigError` を返す。
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--auto" => config.auto = true,
                "--help" | "-h" => return Err(ConfigError::Help),
                "--level" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--level"))?;
                    config.level = value.parse().map_err(|_err| ConfigError::InvalidValue {
                        flag: "--level",
                        value,
                    })?;
                }
                "--log" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--log"))?;
                    config.log_format = match value.as_str() {
                        "json" => LogFormat::Json,
                        "pretty" => LogFormat::Pretty,
                        _ => {
                            return Err(ConfigError::InvalidValue {
                                flag: "--log",
                                value,
                            });
                        }
                    };
                }
                "--size" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--size"))?;
                    config.board_size = value.parse().map_err(|_err| ConfigError::InvalidValue {
                        flag: "--size",
                        value,
                    })?;
                }
                _ => return Err(ConfigError::Unknown(arg)),
            }
        }

        Ok(config)
    }
}

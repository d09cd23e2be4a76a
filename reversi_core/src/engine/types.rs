use core::fmt;

/// 石の色（手番）。
///
/// 値は黒と白の2つだけで、拡張されることはない。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Piece {
    /// 先手。
    Black,
    /// 後手。
    White,
}

impl Piece {
    /// 両方の色（集計順）。
    pub const ALL: [Self; 2] = [Self::Black, Self::White];

    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Piece {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Black => formatter.write_str("Black"),
            Self::White => formatter.write_str("White"),
        }
    }
}

/// 盤面上のマスの座標。
///
/// 符号なし整数なので負の座標は表現できない。盤の大きさとの比較は
/// `Engine` 側で行う。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Coord {
    /// 列（0 が左端）。
    x: u8,
    /// 行（0 が上端）。
    y: u8,
}

impl Coord {
    /// 座標（x, y）から `Coord` を生成する。
    #[inline]
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// x 座標を返す。
    #[inline]
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// y 座標を返す。
    #[inline]
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// 方向 `(dx, dy)` へ1マス進めた座標を返す。負になる場合は `None`。
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }
}

impl fmt::Display for Coord {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

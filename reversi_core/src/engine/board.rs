use crate::engine::types::{Coord, Piece};
use std::collections::HashMap;

/// 置かれている石だけを保持する盤面。
///
/// キーが無いマスは空きマスを表す。キーはすべて盤の範囲内でなければならず、
/// 範囲外のキーを挿入しないことは呼び出し側の責任とする。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Board {
    /// 座標から石への対応。
    pieces: HashMap<Coord, Piece>,
}

impl Board {
    /// 全消去する。
    #[inline]
    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// 指定マスに石があるかを返す。
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.pieces.contains_key(&coord)
    }

    /// 指定した色の石数を返す。
    #[inline]
    #[must_use]
    pub fn count(&self, piece: Piece) -> u32 {
        let mut total = u32::MIN;
        for value in self.pieces.values() {
            if *value == piece {
                total = total.saturating_add(1);
            }
        }
        total
    }

    /// 石数（黒、白）を返す。
    #[inline]
    #[must_use]
    pub fn counts(&self) -> (u32, u32) {
        (self.count(Piece::Black), self.count(Piece::White))
    }

    /// 指定マスの石を返す。
    #[inline]
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        self.pieces.get(&coord).copied()
    }

    /// 石を置く（上書き可）。以前の石を返す。
    #[inline]
    pub fn insert(&mut self, coord: Coord, piece: Piece) -> Option<Piece> {
        self.pieces.insert(coord, piece)
    }

    /// 石が1つも無いかを返す。
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// 置かれている石を列挙する（順序は不定）。
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces.iter().map(|(coord, piece)| (*coord, *piece))
    }

    /// 置かれている石の総数を返す。
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// 空の盤面を返す。
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            pieces: HashMap::new(),
        }
    }
}

impl FromIterator<(Coord, Piece)> for Board {
    #[inline]
    fn from_iter<T: IntoIterator<Item = (Coord, Piece)>>(iter: T) -> Self {
        Self {
            pieces: iter.into_iter().collect(),
        }
    }
}

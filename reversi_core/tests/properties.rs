//! 任意の盤面について、合法手の列挙と着手適用の性質を確認する。

use proptest::prelude::*;
use reversi_core::engine::{Board, BoardEvent, Coord, Engine, Piece};

/// 性質テストで使う盤の一辺。
const SIZE: u8 = 6;

/// マスの中身（空き・黒・白）。
fn cell() -> impl Strategy<Value = Option<Piece>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(Piece::Black)),
        1 => Just(Some(Piece::White)),
    ]
}

/// `SIZE`×`SIZE` の任意の盤面。
fn board() -> impl Strategy<Value = Board> {
    prop::collection::vec(cell(), usize::from(SIZE) * usize::from(SIZE)).prop_map(|cells| {
        (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| Coord::new(x, y)))
            .zip(cells)
            .filter_map(|(coord, piece)| piece.map(|value| (coord, value)))
            .collect()
    })
}

fn color() -> impl Strategy<Value = Piece> {
    prop_oneof![Just(Piece::Black), Just(Piece::White)]
}

fn engine() -> Engine {
    match Engine::new(SIZE) {
        Ok(value) => value,
        Err(err) => panic!("engine must build, got={err:?}"),
    }
}

/// `from` から `to` への方向（8方向のいずれか）と距離を返す。
fn ray(from: Coord, to: Coord) -> Option<(i8, i8, u8)> {
    let dx = i16::from(to.x()) - i16::from(from.x());
    let dy = i16::from(to.y()) - i16::from(from.y());
    let distance = dx.abs().max(dy.abs());
    if distance == 0 || (dx != 0 && dy != 0 && dx.abs() != dy.abs()) {
        return None;
    }
    let step_x = i8::try_from(dx.signum()).ok()?;
    let step_y = i8::try_from(dy.signum()).ok()?;
    Some((step_x, step_y, u8::try_from(distance).ok()?))
}

proptest! {
    #[test]
    fn legal_plays_match_predicate(board in board(), color in color()) {
        let engine = engine();
        let expected: Vec<Coord> = (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| Coord::new(x, y)))
            .filter(|coord| engine.is_legal_play(&board, color, *coord))
            .collect();

        prop_assert_eq!(engine.legal_plays(&board, color), expected);
        prop_assert_eq!(engine.can_play(&board, color), !engine.legal_plays(&board, color).is_empty());
    }

    #[test]
    fn occupied_and_outside_cells_are_illegal(board in board(), color in color(), x in 0..=u8::MAX, y in 0..=u8::MAX) {
        let engine = engine();
        let coord = Coord::new(x, y);
        if x >= SIZE || y >= SIZE || board.contains(coord) {
            prop_assert!(!engine.is_legal_play(&board, color, coord));
        }
    }

    #[test]
    fn flips_are_bracketed_opponent_runs(board in board(), color in color()) {
        let engine = engine();
        for coord in engine.legal_plays(&board, color) {
            let before = board.clone();
            let mut after = board.clone();
            let events = engine.apply_play(&mut after, color, coord);

            prop_assert_eq!(after.get(coord), Some(color));
            prop_assert_eq!(events.first(), Some(&BoardEvent::Placed { coord, piece: color }));
            prop_assert!(events.len() >= 2);

            for event in events.iter().skip(1) {
                let flipped = event.coord();
                prop_assert_eq!(before.get(flipped), Some(color.next()));
                prop_assert_eq!(after.get(flipped), Some(color));

                let Some((dx, dy, distance)) = ray(coord, flipped) else {
                    return Err(TestCaseError::fail(format!("{flipped} is not on a ray from {coord}")));
                };

                // 間のマスはすべて相手の石で、その先に空きなく自分の石がある。
                let mut cursor = coord;
                for _ in 0..distance {
                    cursor = cursor.offset(dx, dy).unwrap_or(cursor);
                    prop_assert_eq!(before.get(cursor), Some(color.next()));
                }
                let mut end = flipped;
                loop {
                    let Some(next) = end.offset(dx, dy).filter(|next| engine.in_bounds(*next)) else {
                        return Err(TestCaseError::fail(format!("run through {flipped} reaches the edge")));
                    };
                    end = next;
                    match before.get(end) {
                        Some(piece) if piece == color => break,
                        Some(_) => {}
                        None => return Err(TestCaseError::fail(format!("run through {flipped} has a gap"))),
                    }
                }
            }

            // 反転していない石は変化しない。
            let changed: Vec<Coord> = events.iter().map(|event| event.coord()).collect();
            for (square, piece) in before.iter() {
                if !changed.contains(&square) {
                    prop_assert_eq!(after.get(square), Some(piece));
                }
            }
            prop_assert_eq!(after.len(), before.len() + 1);
        }
    }

    #[test]
    fn queries_do_not_mutate(board in board(), color in color()) {
        let engine = engine();
        let snapshot = board.clone();
        let first = engine.legal_plays(&board, color);
        let second = engine.legal_plays(&board, color);

        prop_assert_eq!(first, second);
        prop_assert_eq!(board, snapshot);
    }
}

use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use log::debug;
use othello::{eval, Board, Game, NUM_SQUARES};

use super::{CanonicalKey, Data, Successor};

/// The opening book: search results keyed by canonical position and indexed by empty square count.
///
/// Moves stored inside entries are in the orientation of the entry's key. `get` maps them back onto the
/// board that was asked about, `get_key` returns them untouched.
#[derive(Clone, Debug)]
pub struct Book {
    entries: HashMap<CanonicalKey, Data>,
    by_empty_count: Vec<BTreeSet<CanonicalKey>>,
}

impl Book {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            by_empty_count: vec![BTreeSet::new(); NUM_SQUARES + 1],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, board: &Board) -> Option<Data> {
        let (key, symmetry) = CanonicalKey::with_symmetry(board);
        self.entries
            .get(&key)
            .map(|data| data.untransform(symmetry))
    }

    pub fn get_key(&self, key: &CanonicalKey) -> Option<Data> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.entries.contains_key(&CanonicalKey::new(board))
    }

    /// Stores `data` for `board` unless the existing entry is more trusted. Moves in `data` are taken to be
    /// in the orientation of `board`. Returns whether the entry was written.
    pub fn put(&mut self, board: &Board, data: Data) -> bool {
        let (key, symmetry) = CanonicalKey::with_symmetry(board);
        self.put_key(key, data.transform(symmetry))
    }

    /// Same as `put` for a key, with moves in the key's orientation.
    pub fn put_key(&mut self, key: CanonicalKey, data: Data) -> bool {
        if let Some(existing) = self.entries.get(&key) {
            if !existing.accepts(&data) {
                return false;
            }
        }

        self.insert(key, data);
        true
    }

    pub(crate) fn insert(&mut self, key: CanonicalKey, data: Data) -> Option<Data> {
        self.by_empty_count[key.empty_count()].insert(key);
        self.entries.insert(key, data)
    }

    /// Adds a frontier position scored by a one ply static estimate. A finished game is stored as solved
    /// with its exact disk differential instead. Stronger existing entries are left alone.
    pub fn add_unevaluated_position(&mut self, board: &Board) -> bool {
        let data = if board.is_game_over() {
            Data::Solved {
                score: board.final_score_centi_disks(),
                best_move: None,
            }
        } else {
            Data::Leaf {
                score: eval::one_ply(board),
            }
        };

        self.put(board, data)
    }

    /// Adds every position of the game as unevaluated, start through final. The game is replayed in full
    /// before the book is touched, so an illegal game leaves the book unchanged.
    pub fn import_game(&mut self, game: &Game) -> Result<usize> {
        let positions = game.positions()?;

        let added = positions
            .iter()
            .filter(|board| self.add_unevaluated_position(board))
            .count();

        debug!(
            "Imported {} with {} positions, {} written",
            game,
            positions.len(),
            added
        );

        Ok(positions.len())
    }

    pub fn size_at_empty_count(&self, empty_count: usize) -> usize {
        self.by_empty_count
            .get(empty_count)
            .map_or(0, |keys| keys.len())
    }

    pub fn keys_at_empty_count(
        &self,
        empty_count: usize,
    ) -> impl Iterator<Item = CanonicalKey> + '_ {
        self.by_empty_count
            .get(empty_count)
            .into_iter()
            .flatten()
            .copied()
    }

    /// The smallest empty count holding an entry, the deepest ply the book reaches.
    pub fn min_depth(&self) -> Option<usize> {
        self.by_empty_count.iter().position(|keys| !keys.is_empty())
    }

    /// The stored children of `board` in legal move order. Moves without an entry are left out.
    pub fn successors(&self, board: &Board) -> Vec<Successor> {
        board
            .legal_squares()
            .filter_map(|square| {
                self.get(&board.play(square)).map(|data| Successor {
                    square,
                    score: data.score(),
                    kind: data.kind(),
                })
            })
            .collect()
    }

    /// Every entry ordered by empty count, then by key.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalKey, Data)> + '_ {
        self.by_empty_count
            .iter()
            .flatten()
            .map(move |key| (*key, self.entries[key]))
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Book {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_games::first_move_game;
    use crate::{BestUnplayed, NodeKind};
    use othello::{GameState, Square, INITIAL_EMPTY_COUNT};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_book_is_empty() {
        let book = Book::new();
        assert!(book.is_empty());
        assert_eq!(book.min_depth(), None);
        assert_eq!(book.get(&Board::initial()), None);
    }

    #[test]
    fn test_absent_is_not_zero_leaf() {
        let mut book = Book::new();
        let board = Board::initial().play(sq("f5"));
        book.put(&board, Data::Leaf { score: 0 });

        assert_eq!(book.get(&board), Some(Data::Leaf { score: 0 }));
        assert_eq!(book.get(&board.pass()), None);
    }

    #[test]
    fn test_overwrite_priority_branch() {
        let mut book = Book::new();
        let board = Board::initial().play(sq("f5"));
        let branch = Data::Branch {
            score: 10,
            best_unplayed: BestUnplayed::Square(sq("f4")),
        };

        book.add_unevaluated_position(&board);
        assert_eq!(book.get(&board).map(|d| d.kind()), Some(NodeKind::Leaf));

        assert!(book.put(&board, branch));
        assert!(!book.add_unevaluated_position(&board));
        assert_eq!(book.get(&board), Some(branch));
    }

    #[test]
    fn test_overwrite_priority_solved() {
        let mut book = Book::new();
        let board = Board::initial().play(sq("f5"));
        let solved = Data::Solved {
            score: -300,
            best_move: Some(sq("d6")),
        };

        book.put(&board, solved);
        book.add_unevaluated_position(&board);
        book.put(
            &board,
            Data::Branch {
                score: 0,
                best_unplayed: BestUnplayed::InBook,
            },
        );

        assert_eq!(book.get(&board), Some(solved));
    }

    #[test]
    fn test_leaf_is_re_estimated() {
        let mut book = Book::new();
        let board = Board::initial();

        book.put(&board, Data::Leaf { score: 12345 });
        assert!(book.add_unevaluated_position(&board));
        assert_eq!(
            book.get(&board),
            Some(Data::Leaf {
                score: eval::one_ply(&board)
            })
        );
    }

    #[test]
    fn test_get_maps_moves_to_board_orientation() {
        let mut book = Book::new();
        let board = Board::initial().play(sq("f5"));
        let data = Data::Branch {
            score: 25,
            best_unplayed: BestUnplayed::Square(sq("f4")),
        };
        book.put(&board, data);

        for symmetry in 0..othello::NUM_SYMMETRIES {
            let image = board.transform(symmetry);
            assert_eq!(book.get(&image), Some(data.transform(symmetry)));
        }
    }

    #[test]
    fn test_import_twice_equals_once() {
        let game = first_move_game(10);

        let mut once = Book::new();
        once.import_game(&game).unwrap();

        let mut twice = Book::new();
        twice.import_game(&game).unwrap();
        twice.import_game(&game).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.len(), game.actions().len() + 1);
    }

    #[test]
    fn test_import_illegal_game_leaves_book_unchanged() {
        let game: Game = "f5d6c3c3".parse().unwrap();
        let mut book = Book::new();

        assert!(book.import_game(&game).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_size_by_empty_count() {
        let game = first_move_game(24);
        let plies = game.actions().len();
        assert!(plies > 0);

        let mut book = Book::new();
        book.import_game(&game).unwrap();

        let floor = INITIAL_EMPTY_COUNT - plies;
        for empty_count in 0..=NUM_SQUARES {
            let expected = usize::from((floor..=INITIAL_EMPTY_COUNT).contains(&empty_count));
            assert_eq!(book.size_at_empty_count(empty_count), expected, "empty count {}", empty_count);
        }

        assert_eq!(book.min_depth(), Some(floor));
        assert_eq!(book.len(), plies + 1);
    }

    #[test]
    fn test_keys_at_empty_count_ordered() {
        let mut book = Book::new();
        let board = Board::initial().play(sq("f5"));
        for square in board.legal_squares() {
            book.add_unevaluated_position(&board.play(square));
        }

        let keys = book.keys_at_empty_count(58).collect::<Vec<_>>();
        assert_eq!(keys.len(), 3);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(book.keys_at_empty_count(100).count(), 0);
    }

    #[test]
    fn test_full_board_is_solved() {
        let mut book = Book::new();
        let full = Board::from_bits(u64::MAX, 0).unwrap();

        book.add_unevaluated_position(&full);
        book.add_unevaluated_position(&full.pass());

        assert_eq!(
            book.get(&full),
            Some(Data::Solved {
                score: 6400,
                best_move: None
            })
        );
        assert_eq!(book.get(&full.pass()).map(|d| d.score()), Some(-6400));
        assert_eq!(book.size_at_empty_count(0), 2);
    }

    #[test]
    fn test_pass_position_and_its_image_are_stored() {
        // White to move with only a2 against a1 and b1, black answers a3 and wipes white out.
        let white = sq("a2").bit();
        let black = sq("a1").bit() | sq("b1").bit();
        let board = Board::from_bits(white, black).unwrap();
        let start = GameState {
            board,
            black_to_move: false,
        };
        let game = Game::with_start(start, vec![othello::Action::Play(sq("a3"))]);

        let mut book = Book::new();
        assert_eq!(book.import_game(&game).unwrap(), 3);

        assert_ne!(CanonicalKey::new(&board), CanonicalKey::new(&board.pass()));
        assert_eq!(book.get(&board).map(|d| d.kind()), Some(NodeKind::Leaf));
        assert_eq!(book.get(&board.pass()).map(|d| d.kind()), Some(NodeKind::Leaf));

        let end = board.pass().play(sq("a3"));
        assert_eq!(
            book.get(&end),
            Some(Data::Solved {
                score: -400,
                best_move: None
            })
        );
    }

    #[test]
    fn test_successors_follow_legal_order() {
        let mut book = Book::new();
        let board = Board::initial().play(sq("f5"));
        book.put(&board.play(sq("f6")), Data::Leaf { score: 30 });
        book.put(&board.play(sq("f4")), Data::Leaf { score: -20 });

        let successors = book.successors(&board);

        assert_eq!(successors.len(), 2);
        assert_eq!(successors[0].square, sq("f4"));
        assert_eq!(successors[0].score, -20);
        assert_eq!(successors[0].mover_score(), 20);
        assert_eq!(successors[1].square, sq("f6"));
        assert_eq!(successors[1].kind, NodeKind::Leaf);
    }

    #[test]
    fn test_iter_is_ordered_by_empty_count() {
        let mut book = Book::new();
        book.import_game(&"f5d6c3".parse().unwrap()).unwrap();

        let empties = book.iter().map(|(key, _)| key.empty_count()).collect::<Vec<_>>();
        assert_eq!(empties, vec![57, 58, 59, 60]);
    }
}

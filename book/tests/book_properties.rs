use book::{Book, CanonicalKey, Data, HeuristicStrategy, NodeKind};
use othello::{solve, Action, Board, Game, CENTI_DISKS_PER_DISK, NUM_SYMMETRIES};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const SOLVE_DEPTH: usize = 6;

/// Plays random moves to the end of the game. Forced passes are left for the replay to fill in.
fn random_game(rng: &mut StdRng) -> Game {
    let mut board = Board::initial();
    let mut actions = vec![];

    while !board.is_game_over() {
        if !board.has_moves() {
            board = board.pass();
            continue;
        }

        let moves = board.legal_squares().collect::<Vec<_>>();
        let square = *moves.choose(rng).unwrap();
        actions.push(Action::Play(square));
        board = board.play(square);
    }

    Game::new(actions)
}

fn random_book(seed: u64, games: usize) -> (Book, Vec<Game>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let games = (0..games).map(|_| random_game(&mut rng)).collect::<Vec<_>>();

    let mut book = Book::new();
    for game in &games {
        book.import_game(game).unwrap();
    }

    (book, games)
}

#[test]
fn canonical_key_is_shared_by_symmetric_images() {
    let (_, games) = random_book(1, 4);

    for game in &games {
        for board in game.positions().unwrap() {
            let key = CanonicalKey::new(&board);
            assert_eq!(CanonicalKey::new(&key.to_board()), key);

            for symmetry in 0..NUM_SYMMETRIES {
                assert_eq!(CanonicalKey::new(&board.transform(symmetry)), key);
            }
        }
    }
}

#[test]
fn import_order_does_not_matter() {
    let (book, mut games) = random_book(2, 6);

    games.reverse();
    let mut reversed = Book::new();
    for game in &games {
        reversed.import_game(game).unwrap();
        reversed.import_game(game).unwrap();
    }

    assert_eq!(book, reversed);
}

#[test]
fn propagation_leaves_no_frontier_on_complete_games() {
    let (mut book, _) = random_book(3, 3);
    let strategy = HeuristicStrategy::new(SOLVE_DEPTH, 0);

    let terminal = book
        .iter()
        .filter(|(key, _)| key.to_board().is_game_over())
        .count();
    let stats = book.propagate(&strategy).unwrap();

    // Finished games are already solved on import.
    assert!(terminal > 0);
    assert_eq!(stats.solved + stats.merged + terminal, book.len());
    for (key, data) in book.iter() {
        let expected = if key.empty_count() <= SOLVE_DEPTH || key.to_board().is_game_over() {
            NodeKind::Solved
        } else {
            NodeKind::Branch
        };
        assert_eq!(data.kind(), expected, "empty count {}", key.empty_count());
    }
}

#[test]
fn propagated_scores_are_negamax_consistent() {
    let (mut book, _) = random_book(4, 3);
    let strategy = HeuristicStrategy::new(SOLVE_DEPTH, 0);
    book.propagate(&strategy).unwrap();

    for (key, data) in book.iter() {
        let board = key.to_board();

        match data {
            Data::Solved { score, .. } if !board.is_game_over() => {
                let exact = solve::solve(&board).score * CENTI_DISKS_PER_DISK;
                assert_eq!(score, exact);
            }
            Data::Branch { score, .. } if board.has_moves() => {
                for successor in book.successors(&board) {
                    assert!(score >= successor.mover_score());
                }
            }
            Data::Branch { score, .. } => {
                let child = book.get(&board.pass()).unwrap();
                assert_eq!(score, -child.score());
            }
            _ => {}
        }
    }
}

#[test]
fn propagated_book_survives_a_file_round_trip() {
    let (mut book, _) = random_book(5, 4);
    book.propagate(&HeuristicStrategy::new(SOLVE_DEPTH, 25)).unwrap();
    book.grow(&HeuristicStrategy::new(SOLVE_DEPTH, 25), &Board::initial(), 8)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("othello.book");

    book.save(&path).unwrap();
    let loaded = Book::load(&path).unwrap();

    assert_eq!(loaded, book);
    assert_eq!(loaded.len(), book.len());
    assert_eq!(loaded.min_depth(), book.min_depth());
}

use crate::board::{Board, MoveError};
use crate::outcome::is_check;
use crate::piece::Rank;
use crate::rules::{all_legal_moves, legal_moves, pseudo_moves, validate_move};
use crate::square::{Square, Team};

fn sq(row: u8, col: u8) -> Square {
    Square { row, col }
}

#[test]
fn fresh_pawn_has_single_and_double_step() {
    let board = Board::new();
    assert_eq!(pseudo_moves(&board, sq(6, 4)), vec![sq(5, 4), sq(4, 4)]);
    assert_eq!(legal_moves(&board, sq(6, 4)), vec![sq(5, 4), sq(4, 4)]);

    // Black mirrors downward.
    assert_eq!(legal_moves(&board, sq(1, 4)), vec![sq(2, 4), sq(3, 4)]);
}

#[test]
fn pawn_double_step_is_gone_after_any_move() {
    let mut board = Board::new();
    board.apply_move(sq(6, 4), sq(5, 4)).unwrap();
    // Re-deriving moves later still sees the one-way flag.
    assert_eq!(legal_moves(&board, sq(5, 4)), vec![sq(4, 4)]);
    assert_eq!(legal_moves(&board, sq(5, 4)), vec![sq(4, 4)]);
}

#[test]
fn pawn_double_step_requires_an_unobstructed_path() {
    let mut board = Board::empty();
    board.place(sq(6, 4), Rank::Pawn, Team::White);
    board.place(sq(5, 4), Rank::Rook, Team::White);
    // Blocked immediately: no forward move at all.
    assert!(pseudo_moves(&board, sq(6, 4)).is_empty());

    let mut board = Board::empty();
    board.place(sq(6, 4), Rank::Pawn, Team::White);
    board.place(sq(4, 4), Rank::Rook, Team::Black);
    // The landing square is occupied, so only the single step survives;
    // a pawn never captures straight ahead.
    assert_eq!(pseudo_moves(&board, sq(6, 4)), vec![sq(5, 4)]);
}

#[test]
fn pawn_captures_diagonally_onto_enemies_only() {
    let mut board = Board::empty();
    board.place(sq(4, 4), Rank::Pawn, Team::White);
    board.place(sq(3, 3), Rank::Pawn, Team::Black);
    // Forward ray first (two steps, unmoved), then the capture.
    assert_eq!(
        pseudo_moves(&board, sq(4, 4)),
        vec![sq(3, 4), sq(2, 4), sq(3, 3)]
    );

    // A friendly piece on the diagonal is not a capture target.
    let mut board = Board::empty();
    board.place(sq(4, 4), Rank::Pawn, Team::White);
    board.place(sq(3, 3), Rank::Pawn, Team::White);
    assert_eq!(pseudo_moves(&board, sq(4, 4)), vec![sq(3, 4), sq(2, 4)]);
}

#[test]
fn opening_knight_moves() {
    let board = Board::new();
    // Two jumps land on the board and off friendly pieces.
    assert_eq!(legal_moves(&board, sq(7, 1)), vec![sq(5, 2), sq(5, 0)]);
}

#[test]
fn sliding_pieces_stop_at_blockers_and_capture_enemies() {
    let mut board = Board::empty();
    board.place(sq(4, 4), Rank::Rook, Team::White);
    board.place(sq(4, 6), Rank::Pawn, Team::White);
    board.place(sq(4, 1), Rank::Pawn, Team::Black);

    let moves = pseudo_moves(&board, sq(4, 4));
    assert_eq!(moves.len(), 11);
    assert!(moves.contains(&sq(4, 1)), "enemy blocker is a capture");
    assert!(!moves.contains(&sq(4, 6)), "friendly blocker is excluded");
    assert!(!moves.contains(&sq(4, 0)), "squares past a blocker are excluded");
    assert_eq!(moves[0], sq(4, 5));
}

#[test]
fn pinned_piece_may_only_move_along_the_pin() {
    let mut board = Board::empty();
    board.place(sq(7, 4), Rank::King, Team::White);
    board.place(sq(6, 4), Rank::Rook, Team::White);
    board.place(sq(0, 4), Rank::Rook, Team::Black);
    board.place(sq(0, 0), Rank::King, Team::Black);

    // Unfiltered generation happily leaves the file.
    assert!(pseudo_moves(&board, sq(6, 4)).contains(&sq(6, 0)));

    // Filtered generation keeps the rook between the kings' file only.
    assert_eq!(
        legal_moves(&board, sq(6, 4)),
        vec![sq(5, 4), sq(4, 4), sq(3, 4), sq(2, 4), sq(1, 4), sq(0, 4)]
    );
}

#[test]
fn legal_moves_never_leave_the_mover_in_check() {
    let mut board = Board::new();
    // An arbitrary open position.
    board.apply_move(sq(6, 5), sq(5, 5)).unwrap();
    board.apply_move(sq(1, 4), sq(3, 4)).unwrap();
    board.apply_move(sq(6, 6), sq(4, 6)).unwrap();

    for team in [Team::White, Team::Black] {
        for (from, to) in all_legal_moves(&board, team) {
            let mut probe = board.clone();
            probe.apply_move(from, to).unwrap();
            assert!(
                !is_check(&probe, team),
                "{team} move {from} -> {to} leaves its own king in check"
            );
        }
    }
}

#[test]
fn opening_position_has_twenty_moves_per_side() {
    let board = Board::new();
    let white = all_legal_moves(&board, Team::White);
    let black = all_legal_moves(&board, Team::Black);
    assert_eq!(white.len(), 20);
    assert_eq!(black.len(), 20);

    // Enumeration order: roster order (a-pawn first), then its forward ray.
    assert_eq!(white[0], (sq(6, 0), sq(5, 0)));
    assert_eq!(white[1], (sq(6, 0), sq(4, 0)));
}

#[test]
fn empty_or_off_board_squares_generate_nothing() {
    let board = Board::new();
    assert!(pseudo_moves(&board, sq(4, 4)).is_empty());
    assert!(legal_moves(&board, sq(4, 4)).is_empty());
    assert!(pseudo_moves(&board, sq(8, 8)).is_empty());
}

#[test]
fn validate_move_reports_each_rejection_kind() {
    let board = Board::new();

    assert_eq!(
        validate_move(&board, Team::White, sq(8, 0), sq(5, 0)),
        Err(MoveError::OutOfBounds { row: 8, col: 0 })
    );
    assert_eq!(
        validate_move(&board, Team::White, sq(4, 4), sq(3, 4)),
        Err(MoveError::EmptySquareSelected { square: sq(4, 4) })
    );
    assert_eq!(
        validate_move(&board, Team::White, sq(1, 4), sq(2, 4)),
        Err(MoveError::WrongTeamSelected {
            square: sq(1, 4),
            expected: Team::White,
        })
    );
    assert_eq!(
        validate_move(&board, Team::White, sq(6, 4), sq(3, 4)),
        Err(MoveError::IllegalMove {
            from: sq(6, 4),
            to: sq(3, 4),
        })
    );
    assert_eq!(
        validate_move(&board, Team::White, sq(6, 4), sq(5, 4)),
        Ok(())
    );
}

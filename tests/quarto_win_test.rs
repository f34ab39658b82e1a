//! Tests for win detection over board positions.

use quarto::{
    Board, Color, EXTENDED_LINE_COUNT, LineKind, Piece, Position, STANDARD_LINE_COUNT, SharedAttribute, Shape,
    Top, find_win, is_draw, lines, new_game,
};

fn piece(code: &str) -> Piece {
    code.parse().unwrap()
}

fn board_with(cells: &[((usize, usize), &str)]) -> Board {
    let mut board = Board::new();
    for ((row, col), code) in cells {
        board.place(*row, *col, piece(code)).unwrap();
    }
    board
}

#[test]
fn test_line_counts() {
    assert_eq!(lines(false).len(), STANDARD_LINE_COUNT);
    assert_eq!(lines(true).len(), EXTENDED_LINE_COUNT);
    assert!(lines(false).iter().all(|line| !line.is_square()));
}

#[test]
fn test_column_of_round_pieces() {
    let board = board_with(&[
        ((0, 2), "BLRF"),
        ((1, 2), "WSRH"),
        ((2, 2), "BSRF"),
        ((3, 2), "WLRH"),
    ]);
    let report = find_win(&board, false).unwrap();
    assert!(report.contains(LineKind::Column(2)));
    assert_eq!(
        report.lines()[0].attributes(),
        &[SharedAttribute::Shape(Shape::Round)]
    );
}

#[test]
fn test_main_diagonal_of_hollow_pieces() {
    let board = board_with(&[
        ((0, 0), "BLSH"),
        ((1, 1), "WSRH"),
        ((2, 2), "BSRH"),
        ((3, 3), "WLSH"),
    ]);
    let report = find_win(&board, false).unwrap();
    assert!(report.contains(LineKind::Diagonal));
    assert_eq!(report.lines()[0].attributes(), &[SharedAttribute::Top(Top::Hole)]);
}

#[test]
fn test_three_in_a_line_is_not_a_win() {
    let board = board_with(&[((1, 0), "BLSF"), ((1, 1), "BSRH"), ((1, 2), "BLRF")]);
    assert!(find_win(&board, true).is_none());
}

#[test]
fn test_square_counts_only_with_extended_rules() {
    let board = board_with(&[
        ((2, 1), "WLSF"),
        ((2, 2), "WSRH"),
        ((3, 1), "WSSF"),
        ((3, 2), "WLRH"),
    ]);
    assert!(find_win(&board, false).is_none());

    let report = find_win(&board, true).unwrap();
    assert!(report.contains(LineKind::Square { row: 2, col: 1 }));
    assert_eq!(
        report.lines()[0].attributes(),
        &[SharedAttribute::Color(Color::White)]
    );
}

#[test]
fn test_extended_game_wins_on_square() {
    let mut game = new_game(true);
    let moves = [("BLSF", (0, 0)), ("BSRH", (0, 1)), ("BLRF", (1, 0)), ("BSSH", (1, 1))];
    for (code, (row, col)) in moves {
        game.select_piece(piece(code)).unwrap();
        game.place_piece(row, col).unwrap();
    }
    assert!(game.is_won());
    let report = game.winning_lines().unwrap();
    assert!(report.contains(LineKind::Square { row: 0, col: 0 }));
}

#[test]
fn test_report_cells_cover_all_winning_lines() {
    let board = board_with(&[
        ((0, 0), "BLSF"),
        ((0, 1), "BSRH"),
        ((0, 2), "BLRF"),
        ((0, 3), "BSSH"),
        ((1, 0), "BLSH"),
        ((2, 0), "BSRF"),
        ((3, 0), "BLRH"),
    ]);
    let report = find_win(&board, false).unwrap();
    assert!(report.contains(LineKind::Row(0)));
    assert!(report.contains(LineKind::Column(0)));

    let cells = report.cells();
    assert_eq!(cells.len(), 7);
    assert!(cells.contains(&Position::new(3, 0).unwrap()));
}

#[test]
fn test_empty_board_is_neither_won_nor_drawn() {
    let board = Board::new();
    assert!(find_win(&board, true).is_none());
    assert!(!is_draw(&board, true));
}

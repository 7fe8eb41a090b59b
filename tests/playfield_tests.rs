//! Playfield tests - walls, locking and spawn checks

use grid_tetris::core::{Piece, Playfield, RecordingSurface, Slot};
use grid_tetris::hud::Board;
use grid_tetris::types::{Direction, GridPos, Point, Rect, Rgb};

#[test]
fn test_walls_sit_under_board_borders() {
    let grid = 20;
    let board = Board::new((200, 220), Point::default());
    let field = board.playfield(grid);
    assert_eq!(field.cols(), 10);
    assert_eq!(field.rows(), 11);

    // Every wall cell is covered by a border rectangle and vice versa.
    let covered = |x: i32, y: i32| {
        board.border_rects(grid).iter().any(|r: &Rect| {
            x * grid >= r.x && x * grid < r.x + r.w && y * grid >= r.y && y * grid < r.y + r.h
        })
    };
    for y in 0..field.rows() {
        for x in 0..field.cols() {
            assert_eq!(
                field.get(x, y) == Some(Slot::Wall),
                covered(x, y),
                "cell ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn test_outside_is_not_free() {
    let field = Playfield::new(6, 6);
    assert!(!field.is_free(-1, 2));
    assert!(!field.is_free(2, -1));
    assert!(!field.is_free(6, 2));
    assert!(field.is_free(2, 2));
}

#[test]
fn test_piece_falls_until_floor_then_locks() {
    let mut field = Playfield::new(6, 6);
    let mut piece = Piece::new("O", Rgb::YELLOW, &[vec![vec![0, 1, 1], vec![0, 1, 1]]], GridPos::new(1, 0)).unwrap();

    let mut steps = 0;
    while !piece.try_move(Direction::Down, &field).is_blocked() {
        steps += 1;
    }
    // Rows 0..4 are free, row 5 is floor; the 2-tall piece rests at y = 3.
    assert_eq!(steps, 3);
    assert_eq!(piece.position(), GridPos::new(1, 3));

    assert!(field.lock(&piece));
    assert_eq!(field.locked_count(), 4);
    assert_eq!(field.get(2, 3), Some(Slot::Locked(Rgb::YELLOW)));
    assert_eq!(field.get(3, 4), Some(Slot::Locked(Rgb::YELLOW)));
}

#[test]
fn test_locking_twice_is_refused() {
    let mut field = Playfield::new(6, 6);
    let piece = Piece::new("O", Rgb::YELLOW, &[vec![vec![0, 1, 1], vec![0, 1, 1]]], GridPos::new(1, 0)).unwrap();
    assert!(field.lock(&piece));
    assert!(!field.lock(&piece));
    assert_eq!(field.locked_count(), 4);
    assert!(field.is_spawn_blocked(&piece));

    field.clear();
    assert_eq!(field.locked_count(), 0);
    assert!(!field.is_spawn_blocked(&piece));
}

#[test]
fn test_draw_emits_locked_cells_only() {
    let mut field = Playfield::new(6, 6);
    let piece = Piece::new("dot", Rgb::RED, &[vec![vec![0, 1]]], GridPos::new(1, 1)).unwrap();
    field.lock(&piece);
    assert!(field.is_dirty());

    let mut surface = RecordingSurface::new();
    field.draw(&mut surface, 10);
    assert_eq!(surface.rectangles(), vec![(Rect::new(20, 10, 10, 10), Rgb::RED)]);
    assert!(!field.is_dirty());
}

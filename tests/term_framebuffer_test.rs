use grid_tetris::content::Content;
use grid_tetris::core::{Surface, Translate};
use grid_tetris::hud::Board;
use grid_tetris::term::{FrameBuffer, BLOCK};
use grid_tetris::types::{GridPos, Point, Rgb};

#[test]
fn board_borders_render_two_chars_per_pixel() {
    let mut board = Board::new((12, 21), Point::default());
    let mut fb = FrameBuffer::new(24, 21);
    board.draw(&mut fb, 1, Rgb::GREY, false);

    for y in 0..21 {
        assert_eq!(fb.get(0, y).unwrap().ch, BLOCK);
        assert_eq!(fb.get(1, y).unwrap().ch, BLOCK);
    }
    // Right wall stops above the floor row; floor spans the rest.
    assert_eq!(fb.get(22, 0).unwrap().ch, BLOCK);
    assert_eq!(fb.get(2, 0).unwrap().ch, ' ');
    assert_eq!(fb.row_text(20), BLOCK.to_string().repeat(24));
    assert_eq!(fb.get(4, 20).unwrap().style.fg, Rgb::GREY);
}

#[test]
fn piece_renders_inside_translated_board() {
    let content = Content::builtin().unwrap();
    let mut piece = content.piece("O").unwrap().spawn(GridPos::new(4, 0)).unwrap();
    let mut fb = FrameBuffer::new(40, 24);
    {
        let mut s = Translate::new(&mut fb, Point::new(1, 1));
        piece.draw(&mut s, 1);
    }
    // O occupies cols 5..=6 of row 0 inside the board, board origin (1, 1).
    let row = fb.row_text(1);
    assert_eq!(&row.chars().skip(12).take(4).collect::<String>(), &BLOCK.to_string().repeat(4));
    assert_eq!(fb.get(12, 1).unwrap().style.fg, Rgb::YELLOW);
    assert_eq!(fb.get(10, 1).unwrap().ch, ' ');
}

#[test]
fn chroma_key_leaves_background_visible() {
    let mut fb = FrameBuffer::new(10, 2).with_color_key(Some(Rgb::PINK));
    fb.draw_text(Point::new(0, 0), "ABCDE", None);
    fb.draw_pixel(Point::new(0, 0), Rgb::PINK);
    fb.draw_pixel(Point::new(1, 0), Rgb::WHITE);
    assert_eq!(fb.row_text(0), format!("AB{}{}E     ", BLOCK, BLOCK));
}

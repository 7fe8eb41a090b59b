//! Content tests - JSON documents resolved into pieces, panels and menus

use serde_json::{json, Value};

use grid_tetris::content::{Content, ContentError, MenuTarget};
use grid_tetris::core::RecordingSurface;
use grid_tetris::hud::{Arrow, ArrowError};
use grid_tetris::types::{GridPos, MenuState, Point, Rect, Rgb};

fn doc() -> Value {
    json!({
        "grid": 20,
        "board": { "surface_size": [200, 220], "surface_position": [40, 0] },
        "stats": {
            "surface_size": [160, 220],
            "surface_position": [260, 0],
            "position_next": [20, 20],
            "size_next": [120, 100],
            "stats": [["LINES", [20, 140], "lines"], ["HELP", [20, 200], null]]
        },
        "pieces": [
            { "name": "O", "color": "yellow", "shape": [[[0, 1, 1], [0, 1, 1]]] },
            { "name": "X", "color": [1, 2, 3], "shape": [[[1]], [[0, 1]]] }
        ],
        "menus": {
            "main": {
                "state": "menu",
                "arrowshape": [[1, 1]],
                "arrowselect": [[[0, 0], "white", "play"], [[0, 20], "grey", "quit"]]
            },
            "settings": {
                "state": "settings",
                "transparent": [255, 0, 255],
                "arrowshape": [[1]],
                "arrowselect": [[[0, 0], "white", "speed"], [[60, 0], "white", "back"]],
                "labels": [["SPEED", [10, 0]], ["BACK", [70, 0]]]
            }
        }
    })
}

fn load(value: &Value) -> Result<Content, ContentError> {
    Content::from_json(&value.to_string())
}

#[test]
fn test_document_resolves() {
    let content = load(&doc()).unwrap();
    assert_eq!(content.grid, 20);
    assert_eq!(content.border_color, Rgb::GREY);
    assert_eq!(content.board.surface_size(), (200, 220));
    assert_eq!(content.board.surface_position(), Point::new(40, 0));
    assert_eq!(content.stats.next_box(), Rect::new(20, 20, 120, 100));
    assert_eq!(content.stats.preview_anchor(content.grid), GridPos::new(2, 1));
    assert_eq!(content.stats.entries()[1].value, None);

    let x = content.piece("X").unwrap();
    assert_eq!(x.color, Rgb::new(1, 2, 3));
    assert_eq!(x.rotation_count(), 2);

    assert_eq!(content.main_menu.state, MenuState::Selection);
    assert_eq!(content.main_menu.transparent, Rgb::PINK);
    assert_eq!(content.main_menu.options.options[1].target, MenuTarget::Quit);
    assert_eq!(content.settings_menu.labels[1].text, "BACK");
    assert_eq!(content.settings_menu.labels[1].position, Point::new(70, 0));
}

#[test]
fn test_pieces_from_content_spawn_and_draw() {
    let content = load(&doc()).unwrap();
    let mut piece = content.piece("O").unwrap().spawn(GridPos::new(3, 5)).unwrap();
    let mut surface = RecordingSurface::new();
    piece.draw(&mut surface, content.grid);
    assert_eq!(surface.rectangles()[0], (Rect::new(80, 100, 20, 20), Rgb::YELLOW));
}

#[test]
fn test_menu_options_drive_an_arrow() {
    let content = load(&doc()).unwrap();
    let menu = &content.settings_menu;
    let mut arrow = Arrow::new(&menu.options).unwrap();
    arrow.update_selection(1);
    arrow.get_data(&menu.options).unwrap();
    assert_eq!(*arrow.target(), MenuTarget::Back);
    assert_eq!(arrow.position(), Point::new(60, 0));
}

#[test]
fn test_unknown_color_is_reported() {
    let mut value = doc();
    value["pieces"][0]["color"] = json!("chartreuse");
    assert!(matches!(load(&value), Err(ContentError::UnknownColor(c)) if c == "chartreuse"));
}

#[test]
fn test_unknown_target_is_a_json_error() {
    let mut value = doc();
    value["menus"]["main"]["arrowselect"][0][2] = json!("credits");
    assert!(matches!(load(&value), Err(ContentError::Json(_))));
}

#[test]
fn test_empty_menu_and_empty_catalog_fail() {
    let mut value = doc();
    value["menus"]["main"]["arrowselect"] = json!([]);
    assert!(matches!(
        load(&value),
        Err(ContentError::Arrow { source: ArrowError::NoOptions, .. })
    ));

    let mut value = doc();
    value["pieces"] = json!([]);
    assert!(matches!(load(&value), Err(ContentError::NoPieces)));

    let mut value = doc();
    value["grid"] = json!(0);
    assert!(matches!(load(&value), Err(ContentError::BadGrid(0))));
}

#[test]
fn test_builtin_layout_fits_the_terminal_grid() {
    let content = Content::builtin().unwrap();
    let field = content.board.playfield(content.grid);
    assert_eq!(field.cols(), 12);
    assert_eq!(field.rows(), 21);

    // Every built-in piece spawns clear of the walls.
    for def in &content.pieces {
        let piece = def.spawn(grid_tetris::core::SPAWN_POSITION).unwrap();
        assert!(!field.is_spawn_blocked(&piece), "{} spawns blocked", def.name);
    }

    let arrow = Arrow::new(&content.main_menu.options).unwrap();
    assert_eq!(*arrow.target(), MenuTarget::Play);
}

#[test]
fn test_grid_defaults_when_omitted() {
    let mut value = doc();
    value.as_object_mut().unwrap().remove("grid");
    assert_eq!(load(&value).unwrap().grid, grid_tetris::types::DEFAULT_GRID);
}

//! App module - screens, menus and the play session driven by the binary
//!
//! The app owns every drawable and decides what to draw each frame. It never
//! touches a terminal: input arrives as [`InputCommand`]s, time as elapsed
//! milliseconds, and output goes to any [`Surface`].

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::content::{Content, Menu, MenuTarget};
use crate::core::{Piece, Playfield, Spawner, Surface, Translate};
use crate::hud::{Arrow, ArrowAction, Board, StatsPanel};
use crate::input::InputCommand;
use crate::types::{Direction, Key, Point, Rgb};

pub const MIN_SPEED: i32 = 1;
pub const MAX_SPEED: i32 = 9;

/// Where menus are drawn on the screen.
pub const MENU_ORIGIN: Point = Point::new(1, 1);

const TITLE: &str = "GRID TETRIS";

/// Milliseconds between gravity steps at `speed`.
pub fn gravity_interval_ms(speed: i32) -> u32 {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    (1000 - (speed - 1) * 100) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Settings,
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One game from first spawn to game over.
pub struct PlaySession {
    board: Board,
    stats: StatsPanel,
    field: Playfield,
    spawner: Spawner,
    piece: Piece,
    preview: Piece,
    placed: u32,
    gravity_acc_ms: u32,
}

impl PlaySession {
    pub fn new(content: &Content, seed: u32, random_rotation: bool) -> Result<Self> {
        let board = content.board.clone();
        let mut stats = content.stats.clone();
        stats.mark_dirty();
        let field = board.playfield(content.grid);
        let mut spawner = Spawner::new(seed, content.pieces.clone())
            .context("building piece spawner")?
            .with_random_rotation(random_rotation);
        let piece = spawner.spawn(field.spawn_position())?;
        let preview = spawner
            .peek()
            .spawn(content.stats.preview_anchor(content.grid))?;
        info!("new game, seed {seed}, first piece {}", piece.name());
        Ok(Self {
            board,
            stats,
            field,
            spawner,
            piece,
            preview,
            placed: 0,
            gravity_acc_ms: 0,
        })
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn placed(&self) -> u32 {
        self.placed
    }

    /// The current piece overlaps a wall or the stack.
    pub fn is_blocked(&self) -> bool {
        self.field.is_spawn_blocked(&self.piece)
    }

    pub fn is_dirty(&self) -> bool {
        self.board.is_dirty()
            || self.stats.is_dirty()
            || self.field.is_dirty()
            || self.piece.is_dirty()
            || self.preview.is_dirty()
    }

    /// Returns false when the game is over.
    pub fn step(&mut self, direction: Direction) -> Result<bool> {
        if !self.piece.try_move(direction, &self.field).is_blocked() {
            return Ok(true);
        }
        if direction != Direction::Down {
            return Ok(true);
        }
        self.lock_and_spawn()
    }

    pub fn rotate(&mut self) {
        self.piece.try_rotate(&self.field);
    }

    /// Advance gravity by `elapsed_ms`. Returns false when the game is over.
    pub fn tick(&mut self, elapsed_ms: u32, speed: i32) -> Result<bool> {
        self.gravity_acc_ms += elapsed_ms;
        let interval = gravity_interval_ms(speed);
        while self.gravity_acc_ms >= interval {
            self.gravity_acc_ms -= interval;
            if !self.step(Direction::Down)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn lock_and_spawn(&mut self) -> Result<bool> {
        if !self.field.lock(&self.piece) {
            return Ok(false);
        }
        self.placed += 1;
        self.piece = self.spawner.spawn(self.field.spawn_position())?;
        let anchor = self.preview.position();
        self.preview = self.spawner.peek().spawn(anchor)?;
        self.stats.mark_dirty();
        if self.is_blocked() {
            info!("game over after {} pieces", self.placed);
            return Ok(false);
        }
        Ok(true)
    }

    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S, content: &Content, speed: i32, debug: bool) {
        let grid = content.grid;
        {
            let mut s = Translate::new(&mut *surface, self.board.surface_position());
            self.board.draw(&mut s, grid, content.border_color, debug);
            self.field.draw(&mut s, grid);
            self.piece.draw(&mut s, grid);
        }

        let placed = self.placed.to_string();
        let speed = speed.to_string();
        let current = self.piece.name().to_string();
        let values = |key: &str| -> Option<String> {
            match key {
                "pieces" => Some(placed.clone()),
                "speed" => Some(speed.clone()),
                "piece" => Some(current.clone()),
                _ => None,
            }
        };
        let mut s = Translate::new(&mut *surface, self.stats.surface_position());
        self.stats.draw(&mut s, grid, &values);
        self.preview.draw(&mut s, grid);
    }
}

pub struct App {
    content: Content,
    seed: u32,
    speed: i32,
    debug: bool,
    screen: Screen,
    main_arrow: Arrow<MenuTarget>,
    settings_arrow: Arrow<MenuTarget>,
    session: Option<PlaySession>,
    dirty: bool,
}

impl App {
    pub fn new(content: Content, seed: u32, debug: bool) -> Result<Self> {
        let main_arrow = menu_arrow(&content.main_menu).context("main menu")?;
        let settings_arrow = menu_arrow(&content.settings_menu).context("settings menu")?;
        Ok(Self {
            content,
            seed,
            speed: MIN_SPEED,
            debug,
            screen: Screen::MainMenu,
            main_arrow,
            settings_arrow,
            session: None,
            dirty: true,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn session(&self) -> Option<&PlaySession> {
        self.session.as_ref()
    }

    /// Transparent key of the current screen's menu; the play screen has none.
    pub fn color_key(&self) -> Option<Rgb> {
        match self.screen {
            Screen::MainMenu => Some(self.content.main_menu.transparent),
            Screen::Settings => Some(self.content.settings_menu.transparent),
            Screen::Play => None,
        }
    }

    /// Whether anything changed since the last [`App::draw`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
            || match self.screen {
                Screen::MainMenu => self.main_arrow.is_dirty(),
                Screen::Settings => self.settings_arrow.is_dirty(),
                Screen::Play => self.session.as_ref().is_some_and(PlaySession::is_dirty),
            }
    }

    /// Force a redraw, e.g. after the terminal was resized.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    fn switch(&mut self, screen: Screen) {
        debug!("screen {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
        self.dirty = true;
    }

    pub fn handle(&mut self, command: InputCommand) -> Result<Flow> {
        match self.screen {
            Screen::MainMenu => self.handle_main(command),
            Screen::Settings => self.handle_settings(command),
            Screen::Play => self.handle_play(command),
        }
    }

    fn handle_main(&mut self, command: InputCommand) -> Result<Flow> {
        match command {
            InputCommand::Nav(key) => {
                let menu = &self.content.main_menu;
                if let ArrowAction::Selected(_) = self.main_arrow.handle_key(key, menu.state) {
                    self.main_arrow.get_data(&menu.options)?;
                }
            }
            InputCommand::Confirm => match *self.main_arrow.target() {
                MenuTarget::Play => self.start_game()?,
                MenuTarget::Settings => self.switch(Screen::Settings),
                MenuTarget::Quit => return Ok(Flow::Quit),
                _ => {}
            },
            InputCommand::Back => return Ok(Flow::Quit),
            InputCommand::Rotate => {}
        }
        Ok(Flow::Continue)
    }

    fn handle_settings(&mut self, command: InputCommand) -> Result<Flow> {
        match command {
            InputCommand::Nav(key) => {
                let menu = &self.content.settings_menu;
                match self.settings_arrow.handle_key(key, menu.state) {
                    ArrowAction::Selected(_) => self.settings_arrow.get_data(&menu.options)?,
                    ArrowAction::ChangeSetting(delta) => self.change_setting(delta),
                    ArrowAction::Ignored => {}
                }
            }
            InputCommand::Confirm if *self.settings_arrow.target() == MenuTarget::Back => {
                self.switch(Screen::MainMenu)
            }
            InputCommand::Back => self.switch(Screen::MainMenu),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn change_setting(&mut self, delta: i32) {
        match *self.settings_arrow.target() {
            MenuTarget::Speed => {
                self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
                debug!("speed set to {}", self.speed);
            }
            MenuTarget::Debug => {
                self.debug = !self.debug;
                debug!("debug grid {}", if self.debug { "on" } else { "off" });
            }
            _ => return,
        }
        self.dirty = true;
    }

    fn handle_play(&mut self, command: InputCommand) -> Result<Flow> {
        let Some(session) = self.session.as_mut() else {
            self.switch(Screen::MainMenu);
            return Ok(Flow::Continue);
        };
        let alive = match command {
            InputCommand::Nav(Key::Left) => session.step(Direction::Left)?,
            InputCommand::Nav(Key::Right) => session.step(Direction::Right)?,
            InputCommand::Nav(Key::Down) => session.step(Direction::Down)?,
            InputCommand::Nav(Key::Up) | InputCommand::Rotate => {
                session.rotate();
                true
            }
            InputCommand::Back => false,
            InputCommand::Confirm => true,
        };
        if !alive {
            self.end_game();
        }
        Ok(Flow::Continue)
    }

    /// Stays on the main menu when the first piece has no room.
    fn start_game(&mut self) -> Result<()> {
        let session = PlaySession::new(&self.content, self.seed, false)?;
        self.seed = self.seed.wrapping_add(1);
        if session.is_blocked() {
            warn!(
                "first piece {} does not fit a {}x{} playfield",
                session.piece().name(),
                session.field().cols(),
                session.field().rows()
            );
            self.end_game();
            return Ok(());
        }
        self.session = Some(session);
        self.switch(Screen::Play);
        Ok(())
    }

    fn end_game(&mut self) {
        self.session = None;
        self.switch(Screen::MainMenu);
    }

    /// Advance time by `elapsed_ms`; only the play screen has gravity.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<()> {
        if self.screen != Screen::Play {
            return Ok(());
        }
        if let Some(session) = self.session.as_mut() {
            if !session.tick(elapsed_ms, self.speed)? {
                self.end_game();
            }
        }
        Ok(())
    }

    /// Draw the whole current screen onto a cleared surface.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        match self.screen {
            Screen::MainMenu => {
                surface.draw_text(Point::new(0, 0), TITLE, Some(Rgb::CYAN));
                draw_menu(surface, &self.content.main_menu, &mut self.main_arrow);
            }
            Screen::Settings => {
                surface.draw_text(Point::new(0, 0), "SETTINGS", Some(Rgb::CYAN));
                draw_menu(surface, &self.content.settings_menu, &mut self.settings_arrow);
                self.draw_setting_values(surface);
            }
            Screen::Play => {
                if let Some(session) = self.session.as_mut() {
                    session.draw(surface, &self.content, self.speed, self.debug);
                }
            }
        }
        self.dirty = false;
    }

    fn draw_setting_values<S: Surface + ?Sized>(&self, surface: &mut S) {
        let menu = &self.content.settings_menu;
        for (option, label) in menu.options.options.iter().zip(&menu.labels) {
            let value = match option.target {
                MenuTarget::Speed => self.speed.to_string(),
                MenuTarget::Debug => (if self.debug { "ON" } else { "OFF" }).to_string(),
                _ => continue,
            };
            let at = MENU_ORIGIN.offset(label.position).offset(Point::new(0, 1));
            surface.draw_text(at, &value, Some(Rgb::WHITE));
        }
    }
}

fn menu_arrow(menu: &Menu) -> Result<Arrow<MenuTarget>> {
    Ok(Arrow::new(&menu.options)?.with_transparent(menu.transparent))
}

fn draw_menu<S: Surface + ?Sized>(surface: &mut S, menu: &Menu, arrow: &mut Arrow<MenuTarget>) {
    for label in &menu.labels {
        surface.draw_text(MENU_ORIGIN.offset(label.position), &label.text, None);
    }
    let mut s = Translate::new(&mut *surface, MENU_ORIGIN.offset(arrow.position()));
    arrow.draw(&mut s);
}

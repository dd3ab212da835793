use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::engine::{Engine, Key};
use crate::keypad;
use crate::theme::Theme;

/// How long a pressed button stays highlighted
const FLASH_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub engine: Engine,
    pub popup: Popup,

    // Keypad cursor as (row, col) into keypad::ROWS
    pub cursor: (usize, usize),

    // Recently pressed button, briefly highlighted (auto-clears on tick)
    pub pressed: Option<Key>,
    pub pressed_at: Option<Instant>,

    // Config
    pub config: AppConfig,
    pub theme: Theme,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.colors);
        Self {
            engine: Engine::new(),
            popup: Popup::None,

            cursor: (0, 0),

            pressed: None,
            pressed_at: None,

            config,
            theme,
        }
    }

    /// Feed one key into the engine and start the press flash
    pub fn press(&mut self, key: Key) {
        self.engine.press(key);
        self.pressed = Some(key);
        self.pressed_at = Some(Instant::now());
        tracing::debug!(
            "pressed '{}', display '{}'",
            key.label(),
            self.engine.display()
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle popups first
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        self.handle_normal_key(key);
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            // Keypad cursor navigation
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),

            // Space presses the highlighted button
            KeyCode::Char(' ') => {
                if let Some(key) = keypad::key_at(self.cursor.0, self.cursor.1) {
                    self.press(key);
                }
            }

            KeyCode::Enter => self.press(Key::Equals),
            KeyCode::Delete => self.press(Key::Clear),

            // Help
            KeyCode::Char('?') => self.popup = Popup::Help,

            // Everything else goes through the keypad alphabet; keys
            // outside it are ignored
            KeyCode::Char(c) => {
                if let Some(key) = Key::from_char(c) {
                    self.press(key);
                }
            }

            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
        ) {
            self.popup = Popup::None;
        }
    }

    /// Press the button under a left click. `keypad_area` must be the
    /// same chunk `ui::screen_layout` hands to the renderer.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, keypad_area: Rect) {
        if self.popup != Popup::None {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(key) = keypad::hit_test(keypad_area, mouse.column, mouse.row) {
                self.press(key);
            }
        }
    }

    /// Move the grid cursor, wrapping at the edges. Stepping onto the
    /// short bottom row clamps the column to its last button.
    fn move_cursor(&mut self, dy: isize, dx: isize) {
        let rows = keypad::ROWS.len() as isize;
        let (mut row, mut col) = self.cursor;

        if dy != 0 {
            row = (row as isize + dy).rem_euclid(rows) as usize;
            col = col.min(keypad::row_len(row) - 1);
        }
        if dx != 0 {
            let len = keypad::row_len(row) as isize;
            col = (col as isize + dx).rem_euclid(len) as usize;
        }

        self.cursor = (row, col);
    }

    /// Clear the press flash once it has run its course. Called every
    /// poll iteration.
    pub fn tick(&mut self) {
        if let Some(at) = self.pressed_at {
            if at.elapsed() >= FLASH_DURATION {
                self.pressed = None;
                self.pressed_at = None;
            }
        }
    }
}

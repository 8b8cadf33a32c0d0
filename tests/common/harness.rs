//! Test harness driving the app against an in-memory terminal backend.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dogview::app::App;
use dogview::config::Config;
use ratatui::backend::TestBackend;
use ratatui::layout::Position;
use ratatui::style::Color;
use ratatui::Terminal;

pub struct AppTestHarness {
    terminal: Terminal<TestBackend>,
    app: App,
}

impl AppTestHarness {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_config(width, height, Config::default())
    }

    pub fn with_config(width: u16, height: u16, config: Config) -> Result<Self> {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            app: App::new(config),
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn should_quit(&self) -> bool {
        self.app.should_quit()
    }

    pub fn render(&mut self) -> Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    pub fn process_async_and_render(&mut self) -> Result<()> {
        self.app.process_async_messages();
        self.render()
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.app.handle_key(KeyEvent::new(code, modifiers))
    }

    pub fn move_mouse(&mut self, column: u16, row: u16) -> bool {
        self.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    pub fn click(&mut self, column: u16, row: u16) -> bool {
        self.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// The whole screen as one newline-separated string.
    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell(Position::new(x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn get_screen_row(&self, row: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        let mut out = String::new();
        for x in 0..buffer.area.width {
            if let Some(cell) = buffer.cell(Position::new(x, row)) {
                out.push_str(cell.symbol());
            }
        }
        out
    }

    /// (foreground, background) of the cell at the given coordinates.
    pub fn cell_colors(&self, x: u16, y: u16) -> (Color, Color) {
        let buffer = self.terminal.backend().buffer();
        let cell = buffer
            .cell(Position::new(x, y))
            .unwrap_or_else(|| panic!("cell ({}, {}) out of bounds", x, y));
        (cell.fg, cell.bg)
    }

    /// Screen position of the first occurrence of `needle`, if rendered.
    pub fn find_on_screen(&self, needle: &str) -> Option<(u16, u16)> {
        let buffer = self.terminal.backend().buffer();
        for y in 0..buffer.area.height {
            let row = self.get_screen_row(y);
            if let Some(byte_x) = row.find(needle) {
                return Some((byte_x as u16, y));
            }
        }
        None
    }

    pub fn assert_screen_contains(&self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(needle),
            "Expected screen to contain '{}'. Screen:\n{}",
            needle,
            screen
        );
    }
}

use crate::config::Config;
use crate::services::dog_api::{self, FetchHandle};
use crate::view::theme::{Theme, ThemeMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;

const WRAPPER_WIDTH: u16 = 40;
const WRAPPER_HEIGHT: u16 = 14;
const BUTTON_WIDTH: u16 = 16;

/// Root view: owns the active palette name and composes the themed widgets.
///
/// Both palettes are loaded once at startup; each render selects the one
/// matching the current mode and hands it down to the child views.
pub struct App {
    config: Config,
    mode: ThemeMode,
    light: Theme,
    dark: Theme,
    dog: DogImageView,
    /// Where the toggle button landed on the last render
    button_area: Rect,
    button_hovered: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mode = ThemeMode::from_name(&config.theme);
        Self {
            mode,
            light: Theme::from_name("light"),
            dark: Theme::from_name("dark"),
            dog: DogImageView::new(),
            button_area: Rect::ZERO,
            button_hovered: false,
            should_quit: false,
            config,
        }
    }

    /// Run-once lifecycle hook, called when the view tree is first attached.
    pub fn mount(&mut self) {
        if self.config.dog.fetch_on_start {
            self.dog.mount(&self.config.dog.api_url);
        }
    }

    /// The palette matching the current mode.
    pub fn theme(&self) -> &Theme {
        match self.mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn button_area(&self) -> Rect {
        self.button_area
    }

    pub fn dog(&self) -> &DogImageView {
        &self.dog
    }

    pub fn dog_mut(&mut self) -> &mut DogImageView {
        &mut self.dog
    }

    /// Flip the active palette. Synchronous; the caller re-renders once.
    pub fn toggle_theme(&mut self) {
        self.mode = self.mode.toggle();
        tracing::debug!(theme = self.mode.name(), "theme toggled");
    }

    /// Drain messages from background work. Returns true if a re-render is needed.
    pub fn process_async_messages(&mut self) -> bool {
        self.dog.process_async_messages()
    }

    /// Returns true if the event changed anything visible.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('t') | KeyCode::Enter => {
                self.toggle_theme();
                true
            }
            _ => false,
        }
    }

    /// Hover tracking and click-to-toggle for the button.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                let hovered = self.button_area.contains(position);
                if hovered != self.button_hovered {
                    self.button_hovered = hovered;
                    return true;
                }
                false
            }
            MouseEventKind::Down(MouseButton::Left) if self.button_area.contains(position) => {
                self.toggle_theme();
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let theme = self.theme().clone();
        let area = frame.area();

        // Page-level styling: background and default text color come from
        // the active theme.
        frame.render_widget(
            Block::default().style(Style::new().bg(theme.body).fg(theme.font_color)),
            area,
        );

        let wrapper = centered(area, WRAPPER_WIDTH, WRAPPER_HEIGHT);
        let [heading, paragraph, _, button_row, _, dog] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .areas(wrapper);

        // The heading keeps its fixed color no matter which theme is active.
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Hello World",
                Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            heading,
        );

        frame.render_widget(
            Paragraph::new("hello agian").alignment(Alignment::Center),
            paragraph,
        );

        self.button_area = centered(button_row, BUTTON_WIDTH, 3);
        self.render_button(frame, &theme);

        self.dog.render(frame, dog, &theme);
    }

    fn render_button(&self, frame: &mut Frame, theme: &Theme) {
        // Hover inverts the button: text takes the body color, fill the font color.
        let (fg, bg) = if self.button_hovered {
            (theme.body, theme.font_color)
        } else {
            (theme.font_color, theme.body)
        };
        let style = Style::new().fg(fg).bg(bg);

        frame.render_widget(
            Paragraph::new("Change Theme")
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            self.button_area,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// View that kicks off the one-shot image fetch when mounted.
pub struct DogImageView {
    /// Whatever the endpoint sent back, verbatim. Starts as an empty string.
    image: Value,
    fetch: Option<FetchHandle>,
}

impl DogImageView {
    pub fn new() -> Self {
        Self {
            image: Value::String(String::new()),
            fetch: None,
        }
    }

    /// Start the fetch on first mount. Re-renders never come back here.
    pub fn mount(&mut self, url: &str) {
        if self.fetch.is_none() {
            self.fetch = Some(dog_api::start_fetch(url));
        }
    }

    /// Install an already-started fetch, for callers that point the view at
    /// their own endpoint.
    pub fn set_fetch_handle(&mut self, handle: FetchHandle) {
        self.fetch = Some(handle);
    }

    /// The stored payload. The renderer never reads this.
    pub fn image(&self) -> &Value {
        &self.image
    }

    pub fn process_async_messages(&mut self) -> bool {
        let Some(fetch) = &self.fetch else {
            return false;
        };
        match fetch.try_recv() {
            Some(envelope) => {
                tracing::debug!(payload = %envelope, "dog api response");
                self.image = envelope;
                true
            }
            None => false,
        }
    }

    /// The image slot renders with an empty source; the stored payload is
    /// never wired up to it.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(
            Paragraph::new(r#"img src="""#)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("random dog")
                        .border_style(Style::new().fg(theme.font_color)),
                ),
            area,
        );
    }
}

impl Default for DogImageView {
    fn default() -> Self {
        Self::new()
    }
}

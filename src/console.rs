//! Terminal capability used by the game, and its crossterm/ratatui implementation.
//!
//! Game logic only sees [`Console`], [`Paint`] and [`Key`]; nothing outside this
//! module touches crossterm or ratatui.

use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::{Backend, CrosstermBackend},
    style::{Color, Modifier, Style},
    widgets::Widget,
    Terminal,
};

use crate::board::Cell;
use crate::error::{GameError, Result};
use crate::input::Key;
use crate::signal::Interrupt;

const SIGNAL_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// What is being drawn, so the console can pick a style for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Border,
    SnakeHead,
    SnakeBody,
    Food,
    Text,
}

pub trait Console {
    /// Take over the terminal.
    fn init(&mut self) -> Result<()>;
    /// Terminal size as (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
    /// Wait up to `timeout` for one key press.
    fn poll_input(&mut self, timeout: Duration) -> Result<Option<Key>>;
    /// Block until a key is pressed. Returns `None` if `interrupt` is raised first.
    fn wait_key(&mut self, interrupt: &Interrupt) -> Result<Option<Key>>;
    fn clear(&mut self);
    fn draw_cell(&mut self, at: Cell, glyph: char, paint: Paint) -> Result<()>;
    fn draw_text(&mut self, at: Cell, text: &str, paint: Paint) -> Result<()>;
    /// Push everything drawn since the last `clear` to the screen.
    fn refresh(&mut self) -> Result<()>;
    /// Give the terminal back.
    fn shutdown(&mut self) -> Result<()>;
}

fn style_for(paint: Paint) -> Style {
    match paint {
        Paint::Border => Style::default().fg(Color::DarkGray),
        Paint::SnakeHead => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Paint::SnakeBody => Style::default().fg(Color::Green),
        Paint::Food => Style::default().fg(Color::LightRed),
        Paint::Text => Style::default(),
    }
}

/// Raw mode, alternate screen and hidden cursor for as long as the guard lives.
#[derive(Debug)]
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
            let _ = restore_terminal();
            return Err(e);
        }
        info!("Terminal acquired");
        Ok(TerminalGuard { active: true })
    }

    /// Restore the terminal now, reporting failures instead of logging them.
    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        info!("Terminal released");
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore_terminal() {
                error!("Failed to restore terminal: {}", e);
            }
        }
    }
}

pub fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}

/// Restore the terminal before the default hook prints the panic message.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

fn key_from(event: KeyEvent) -> Key {
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

fn read_key_press() -> io::Result<Option<Key>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key_from(key))),
        _ => Ok(None),
    }
}

/// Shows the off-screen canvas in whatever part of the frame it overlaps.
#[derive(Clone, Copy)]
struct CanvasView<'a>(&'a Buffer);

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(self.0.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                buf[(x, y)] = self.0[(x, y)].clone();
            }
        }
    }
}

/// Draws into an off-screen buffer and hands it to ratatui on `refresh`.
pub struct TuiConsole<B: Backend> {
    terminal: Terminal<B>,
    canvas: Buffer,
    guard: Option<TerminalGuard>,
}

impl TuiConsole<CrosstermBackend<Stdout>> {
    pub fn stdout() -> Result<Self> {
        let terminal =
            Terminal::new(CrosstermBackend::new(io::stdout())).map_err(GameError::TerminalInit)?;
        Self::new(terminal)
    }
}

impl<B: Backend> TuiConsole<B> {
    pub fn new(terminal: Terminal<B>) -> Result<Self> {
        let size = terminal.size().map_err(GameError::TerminalInit)?;
        Ok(TuiConsole {
            terminal,
            canvas: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            guard: None,
        })
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn out_of_bounds(at: Cell) -> GameError {
        GameError::RenderOutOfBounds {
            row: at.row,
            col: at.col,
        }
    }
}

impl<B: Backend> Console for TuiConsole<B> {
    fn init(&mut self) -> Result<()> {
        if self.guard.is_none() {
            self.guard = Some(TerminalGuard::acquire().map_err(GameError::TerminalInit)?);
            self.terminal.clear().map_err(GameError::TerminalInit)?;
        }
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    fn poll_input(&mut self, timeout: Duration) -> Result<Option<Key>> {
        if event::poll(timeout)? {
            return Ok(read_key_press()?);
        }
        Ok(None)
    }

    fn wait_key(&mut self, interrupt: &Interrupt) -> Result<Option<Key>> {
        // Drop keys still queued from play so the end screen is not skipped.
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        while !interrupt.is_raised() {
            if event::poll(SIGNAL_CHECK_INTERVAL)? {
                if let Some(key) = read_key_press()? {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }

    fn clear(&mut self) {
        self.canvas.reset();
    }

    fn draw_cell(&mut self, at: Cell, glyph: char, paint: Paint) -> Result<()> {
        let cell = self
            .canvas
            .cell_mut((at.col, at.row))
            .ok_or_else(|| Self::out_of_bounds(at))?;
        cell.set_char(glyph).set_style(style_for(paint));
        Ok(())
    }

    fn draw_text(&mut self, at: Cell, text: &str, paint: Paint) -> Result<()> {
        let area = self.canvas.area;
        let end = usize::from(at.col) + text.chars().count();
        if at.row >= area.height || at.col >= area.width || end > usize::from(area.width) {
            return Err(Self::out_of_bounds(at));
        }
        self.canvas.set_string(at.col, at.row, text, style_for(paint));
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        let canvas = CanvasView(&self.canvas);
        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(canvas, area);
        })?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        match self.guard.take() {
            Some(guard) => Ok(guard.release()?),
            None => Ok(()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn test_console(cols: u16, rows: u16) -> TuiConsole<TestBackend> {
        TuiConsole::new(Terminal::new(TestBackend::new(cols, rows)).unwrap()).unwrap()
    }

    fn screen_line(console: &TuiConsole<TestBackend>, y: u16) -> String {
        let buf = console.terminal().backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_key_mapping() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_from(ctrl_c), Key::Interrupt);

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(key_from(plain_c), Key::Char('c'));

        let shift_w = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(key_from(shift_w), Key::Char('W'));

        assert_eq!(key_from(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)), Key::Left);
        assert_eq!(key_from(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), Key::Other);
    }

    #[test]
    fn test_draw_and_refresh() {
        let mut console = test_console(10, 4);
        assert_eq!(console.size().unwrap(), (10, 4));

        console.draw_text(Cell::new(1, 2), "hi", Paint::Text).unwrap();
        console.draw_cell(Cell::new(2, 0), '@', Paint::SnakeHead).unwrap();
        console.refresh().unwrap();

        assert_eq!(screen_line(&console, 1), "  hi      ");
        assert_eq!(screen_line(&console, 2), "@         ");

        console.clear();
        console.refresh().unwrap();
        assert_eq!(screen_line(&console, 1), "          ");
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut console = test_console(10, 4);

        assert!(matches!(
            console.draw_cell(Cell::new(4, 0), '#', Paint::Border),
            Err(GameError::RenderOutOfBounds { row: 4, col: 0 })
        ));
        assert!(matches!(
            console.draw_text(Cell::new(0, 8), "abc", Paint::Text),
            Err(GameError::RenderOutOfBounds { row: 0, col: 8 })
        ));
        assert!(console.draw_text(Cell::new(0, 7), "abc", Paint::Text).is_ok());
    }

    #[test]
    fn test_canvas_view_clips_to_overlap() {
        let mut canvas = Buffer::empty(Rect::new(0, 0, 3, 2));
        canvas.set_string(0, 1, "abc", Style::default());
        let mut frame = Buffer::empty(Rect::new(0, 0, 2, 3));

        CanvasView(&canvas).render(frame.area, &mut frame);

        assert_eq!(frame[(0, 1)].symbol(), "a");
        assert_eq!(frame[(1, 1)].symbol(), "b");
        assert_eq!(frame[(0, 2)].symbol(), " ");
    }

    #[test]
    fn test_styles_reach_the_screen() {
        let mut console = test_console(3, 1);
        console.draw_cell(Cell::new(0, 1), '*', Paint::Food).unwrap();
        console.refresh().unwrap();

        let buf = console.terminal().backend().buffer();
        assert_eq!(buf[(1, 0)].symbol(), "*");
        assert_eq!(buf[(1, 0)].fg, Color::LightRed);
    }
}

//! Terminal display and input handling

use crate::camera::Action;
use crate::error::{DonutError, Result};
use crate::raster::GlyphGrid;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::Duration;

/// Source of one input symbol per frame. Never blocks.
pub trait InputSource {
    fn poll_action(&mut self) -> io::Result<Action>;
}

/// Destination for finished frames
pub trait DisplaySink {
    fn blit(&mut self, grid: &GlyphGrid, status: &str) -> io::Result<()>;
}

/// Raw-mode terminal session with buffered output.
///
/// Creating it enters the alternate screen, raw mode and hides the cursor;
/// dropping it puts everything back.
pub struct TerminalDisplay {
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> Result<Self> {
        let mut stdout = stdout();
        begin_session(&mut stdout, terminal::enable_raw_mode, terminal::disable_raw_mode)
            .map_err(DonutError::Terminal)?;

        tracing::debug!("Terminal session started");

        Ok(Self {
            buffer: BufWriter::new(stdout),
        })
    }

    /// Current terminal size in cells
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl InputSource for TerminalDisplay {
    fn poll_action(&mut self) -> io::Result<Action> {
        if event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                return Ok(parse_key_event(key_event));
            }
        }
        Ok(Action::None)
    }
}

impl DisplaySink for TerminalDisplay {
    /// Status on the top row, glyph rows below it. Every line is placed
    /// with an explicit cursor move so an overlong line cannot shift the
    /// ones after it.
    fn blit(&mut self, grid: &GlyphGrid, status: &str) -> io::Result<()> {
        queue!(
            self.buffer,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            Print(status)
        )?;

        for (i, line) in grid.lines().enumerate() {
            let row = u16::try_from(i + 1).unwrap_or(u16::MAX);
            queue!(self.buffer, cursor::MoveTo(0, row), Print(line))?;
        }

        self.buffer.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.buffer.flush();
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
        tracing::debug!("Terminal restored");
    }
}

/// Enter the alternate screen, switch to raw mode, hide the cursor and
/// clear. If a step fails, the steps before it are undone so the shell is
/// not left in a half-set-up state.
fn begin_session<W, E, D>(out: &mut W, enable_raw: E, disable_raw: D) -> io::Result<()>
where
    W: Write,
    E: FnOnce() -> io::Result<()>,
    D: FnOnce() -> io::Result<()>,
{
    execute!(out, EnterAlternateScreen)?;

    if let Err(e) = enable_raw() {
        let _ = execute!(out, LeaveAlternateScreen);
        return Err(e);
    }

    if let Err(e) = execute!(out, cursor::Hide, terminal::Clear(ClearType::All)) {
        let _ = disable_raw();
        let _ = execute!(out, cursor::Show, LeaveAlternateScreen);
        return Err(e);
    }

    Ok(())
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    // Windows reports releases too
    if event.kind == KeyEventKind::Release {
        return Action::None;
    }

    match event.code {
        KeyCode::Esc => Action::Quit,
        // Raw mode swallows SIGINT, so Ctrl-C arrives as a key
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(c) => Action::from_char(c),
        _ => Action::None,
    }
}

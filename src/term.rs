use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

/// Terminal position as (column, row), zero based.
pub type ScreenPos = (u16, u16);

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: ScreenPos,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    /// Undo `setup`. Every step is attempted; the first failure is reported.
    pub fn restore(&mut self) -> io::Result<()> {
        let raw = terminal::disable_raw_mode();
        let cursor = execute!(self.stdout, cursor::Show, cursor::EnableBlinking);
        let screen = execute!(self.stdout, LeaveAlternateScreen);
        raw.and(cursor).and(screen)
    }

    /// Waits up to `timeout` for a key press. Releases and repeats are skipped.
    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(ev) if ev.kind == KeyEventKind::Press => Ok(Some(ev)),
            _ => Ok(None),
        }
    }

    pub fn size(&self) -> ScreenPos {
        (self.width, self.height)
    }

    pub fn draw_borders(&mut self, top_left: ScreenPos, width: u16, height: u16) -> io::Result<()> {
        let (x0, y0) = top_left;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {"+"} else {"-"};
            self.print_at((x, y0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), "|")?;
            self.print_at((end_x, y), "|")?;
        }

        Ok(())
    }

    /// Writes a line of text centered on row `y`, blanking the rest of the row.
    pub fn print_centered(&mut self, y: u16, text: &str) -> io::Result<()> {
        let line = format!("{text: ^width$}", text = text, width = self.width as usize);
        self.print_at((0, y), &line)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as u16;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        self.print_at_no_save(top_left, &blank)?;
        self.print_at_no_save((top_left.0, top_left.1 + msg_height - 1), &blank)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_at_no_save((top_left.0, top_left.1 + i as u16 + 1), &padded_line)?;
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back what the message covered, from the screen buffer
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            let row: String = (msg.top_left.0..msg.top_left.0 + msg.width)
                .map(|x| self.saved(x, y))
                .collect();
            self.print_at_no_save((msg.top_left.0, y), &row)?;
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: ScreenPos, text: &str) -> io::Result<()> {
        let (x, y) = pos;
        if y >= self.height {
            return Ok(());
        }

        for (i, ch) in text.chars().enumerate() {
            let col = x as usize + i;
            if col >= self.width as usize {
                break;
            }
            self.screen[self.width as usize * y as usize + col] = ch;
        }

        self.print_at_no_save(pos, text)
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn saved(&self, x: u16, y: u16) -> char {
        buffered_char(&self.screen, self.width, x, y)
    }

    fn print_at_no_save(&mut self, pos: ScreenPos, text: &str) -> io::Result<()> {
        // Used for messages, so the buffer keeps what lies underneath them
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        let room = (self.width - pos.0) as usize;
        let clipped: String = text.chars().take(room).collect();
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(clipped))
    }
}

/// Character kept in a row-major screen buffer; blank outside it.
fn buffered_char(screen: &[char], width: u16, x: u16, y: u16) -> char {
    if x >= width {
        return ' ';
    }

    screen
        .get(width as usize * y as usize + x as usize)
        .copied()
        .unwrap_or(' ')
}

use std::io::{stdout, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use unicode_width::UnicodeWidthChar;

use super::{Renderer, TerminalGuard};
use crate::layout::label_width;
use crate::types::{PlacedItem, Rect};

pub const END_SCREEN_MESSAGE: &str = "Congrats on nuking the server!";

/// Draws labels as bordered boxes with crossterm commands.
pub struct CrosstermRenderer<W: Write> {
    out: W,
    width: u16,
    height: u16,
    guard: Option<TerminalGuard>,
}

impl CrosstermRenderer<Stdout> {
    /// Takes over the terminal and sizes the renderer to it.
    pub fn acquire() -> Result<Self> {
        let guard = TerminalGuard::acquire()?;
        let (width, height) = terminal::size()?;
        let mut renderer = Self::new(stdout(), width, height);
        renderer.guard = Some(guard);
        Ok(renderer)
    }
}

impl<W: Write> CrosstermRenderer<W> {
    /// A renderer writing to an arbitrary sink, without touching the
    /// terminal mode.
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            width,
            height,
            guard: None,
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn draw_frame(&mut self, rect: Rect, text: &str, highlight: bool) -> Result<()> {
        let inner_width = rect.x1.saturating_sub(rect.x0).saturating_sub(2);
        let inner_height = rect.y1.saturating_sub(rect.y0).saturating_sub(2);
        let lines = frame_lines(inner_width as usize, inner_height as usize, text);

        if highlight {
            queue!(
                self.out,
                SetForegroundColor(Color::Red),
                SetAttribute(Attribute::Bold)
            )?;
        }

        for (offset, line) in lines.iter().enumerate() {
            let row = rect.y0 as usize + offset;
            if row >= self.height as usize || rect.x0 >= self.width {
                continue;
            }
            let visible = clip(line, (self.width - rect.x0) as usize);
            queue!(self.out, cursor::MoveTo(rect.x0, row as u16), Print(visible))?;
        }

        if highlight {
            queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for CrosstermRenderer<W> {
    fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn draw(&mut self, placed: &[PlacedItem]) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        for p in placed {
            self.draw_frame(p.rect, &p.item.identifier, p.item.is_marked())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn draw_empty(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        let rect = Rect {
            x0: 0,
            y0: 0,
            x1: self.width,
            y1: self.height,
        };
        self.draw_frame(rect, END_SCREEN_MESSAGE, false)?;
        self.out.flush()?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        match self.guard.as_mut() {
            Some(guard) => guard.restore(),
            None => Ok(()),
        }
    }
}

/// The rows of a box with `inner_width` x `inner_height` cells of content,
/// `text` on the first content row.
fn frame_lines(inner_width: usize, inner_height: usize, text: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(inner_height + 2);
    lines.push(format!("┌{}┐", "─".repeat(inner_width)));
    for row in 0..inner_height {
        let content = if row == 0 { clip(text, inner_width) } else { String::new() };
        let fill = inner_width.saturating_sub(label_width(&content) as usize);
        lines.push(format!("│{}{}│", content, " ".repeat(fill)));
    }
    lines.push(format!("└{}┘", "─".repeat(inner_width)));
    lines
}

/// The longest prefix of `line` that fits in `max_cols` cells.
fn clip(line: &str, max_cols: usize) -> String {
    let mut used = 0;
    line.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= max_cols
        })
        .collect()
}

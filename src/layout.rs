//! Random placement of labels inside the viewport.
//!
//! Every item gets an independent, uniformly random position. Overlaps are
//! allowed; nothing here tries to avoid them.
use rand::Rng;
use unicode_width::UnicodeWidthStr;

use crate::types::{Item, PlacedItem, Rect};

/// Horizontal padding taken by the label border.
pub const LABEL_PADDING: u16 = 2;
/// Height of a bordered label.
pub const LABEL_HEIGHT: u16 = 3;

/// The outcome of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// There was nothing to place; the caller should show the end screen.
    Empty,
    Placed(Vec<PlacedItem>),
}

impl Layout {
    #[cfg(test)]
    pub fn into_placed(self) -> Vec<PlacedItem> {
        match self {
            Layout::Empty => Vec::new(),
            Layout::Placed(placed) => placed,
        }
    }
}

/// Display width of a label's text.
pub fn label_width(identifier: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(identifier)).unwrap_or(u16::MAX)
}

/// Places every item at a random position inside a `width` x `height`
/// viewport.
///
/// x is drawn from `[0, width - len)` and y from `[0, height)`. When the label
/// does not fit, the x range collapses to `[0, 1)` and the renderer clips it.
pub fn layout<R: Rng + ?Sized>(items: &[Item], width: u16, height: u16, rng: &mut R) -> Layout {
    if items.is_empty() {
        return Layout::Empty;
    }

    let y_range = height.max(1);
    let placed = items
        .iter()
        .map(|item| {
            let len = label_width(&item.identifier);
            let x_range = width.saturating_sub(len).max(1);
            let x = rng.gen_range(0..x_range);
            let y = rng.gen_range(0..y_range);
            PlacedItem {
                item: item.clone(),
                rect: Rect {
                    x0: x,
                    y0: y,
                    x1: x.saturating_add(len).saturating_add(LABEL_PADDING),
                    y1: y.saturating_add(LABEL_HEIGHT),
                },
            }
        })
        .collect();

    Layout::Placed(placed)
}

//! This module defines the core data types shared by the source, layout and UI.

/// How a label should currently be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Normal,
    /// A deletion was requested for this object since the last refresh.
    MarkedForRemoval,
}

/// A single workload object as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The object's name, unique within a snapshot.
    pub identifier: String,
    pub display_state: DisplayState,
}

impl Item {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_state: DisplayState::Normal,
        }
    }

    pub fn is_marked(&self) -> bool {
        self.display_state == DisplayState::MarkedForRemoval
    }
}

/// The full set of live objects known after the most recent refresh.
///
/// Snapshots are replaced wholesale on each refresh; the only mutation is
/// flipping an item to `MarkedForRemoval`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    items: Vec<Item>,
}

impl Snapshot {
    /// Builds a snapshot from names in list order, keeping only the first
    /// occurrence of each name.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = std::collections::HashSet::new();
        let items = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .map(Item::new)
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flips the named item to `MarkedForRemoval`. Returns `false` when the
    /// snapshot has no such item.
    pub fn mark_for_removal(&mut self, identifier: &str) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.identifier == identifier)
        {
            Some(item) => {
                item.display_state = DisplayState::MarkedForRemoval;
                true
            }
            None => false,
        }
    }
}

/// A rectangle in terminal cells. Both corners are part of the hit area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Rect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// An item paired with the rectangle it was given in the current layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub item: Item,
    pub rect: Rect,
}

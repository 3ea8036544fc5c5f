/// Navigator — a bounded cursor over a flattened item sequence.
use thiserror::Error;

use crate::core::flatten::Item;
use crate::schema::content::ContentId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("content not in sequence: {0}")]
    NotFound(ContentId),
}

/// Items surrounding the cursor, clipped to the sequence bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    pub before: &'a [Item],
    pub after: &'a [Item],
}

/// 1-based progress through a sequence ("line 3 of 7").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction of the sequence reached, in 0.0..=1.0.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Cursor over a sequence of items.
///
/// Whenever the sequence is non-empty the position is a valid index.
/// Movement saturates at both ends and never wraps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    items: Vec<Item>,
    position: usize,
}

impl Navigator {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, position: 0 }
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

    /// Current index, or `None` for an empty sequence.
    pub fn position(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.position)
        }
    }

    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.position)
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.items.len()
    }

    /// Advance by one. Returns false at the last item.
    pub fn next(&mut self) -> bool {
        if self.position + 1 < self.items.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Step back by one. Returns false at the first item.
    pub fn previous(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Move to the item whose content id is `id`.
    ///
    /// On a miss the position is left where it was.
    pub fn seek_to_id(&mut self, id: &ContentId) -> Result<usize, NavigatorError> {
        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.position = index;
                Ok(index)
            }
            None => {
                tracing::debug!(content = %id, "seek target not in sequence");
                Err(NavigatorError::NotFound(id.clone()))
            }
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Swap in a new sequence. Indices from the old sequence mean nothing
    /// in the new one, so the cursor returns to the start.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
        self.reset();
    }

    /// Up to `before` items preceding the cursor and up to `after` items
    /// following it.
    pub fn context_window(&self, before: usize, after: usize) -> ContextWindow<'_> {
        if self.items.is_empty() {
            return ContextWindow {
                before: &[],
                after: &[],
            };
        }
        let start = self.position.saturating_sub(before);
        let end = self
            .position
            .saturating_add(1)
            .saturating_add(after)
            .min(self.items.len());
        ContextWindow {
            before: &self.items[start..self.position],
            after: &self.items[self.position + 1..end],
        }
    }

    /// Progress through the sequence, or `None` when it is empty.
    pub fn progress(&self) -> Option<Progress> {
        self.position().map(|position| Progress {
            current: position + 1,
            total: self.items.len(),
        })
    }
}

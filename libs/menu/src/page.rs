use std::cell::RefCell;
use std::rc::Rc;

use crate::items::{ItemHandle, MenuItem, PageHandle};
use crate::surface::{Surface, TextStyle};

/// Ordered collection of items plus one hovered selection cursor.
///
/// Insertion order is display and navigation order. On a non-empty page
/// exactly one item is hovered and carries the selected flag; gestures are
/// offered to that item first and only fall back to page-level behaviour
/// when the item declines them.
pub struct Page<S: Surface> {
    name: String,
    items: Vec<ItemHandle<S>>,
    hovered_idx: usize,
}

impl<S: Surface> Page<S> {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
            hovered_idx: 0,
        }
    }

    /// New page wrapped for sharing between the menu catalog, the
    /// navigation stack and items targeting it.
    #[must_use]
    pub fn shared(name: &str) -> PageHandle<S> {
        Rc::new(RefCell::new(Self::new(name)))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item. The first item added is hovered by default.
    pub fn add_item(&mut self, item: ItemHandle<S>) {
        if self.items.is_empty() {
            item.borrow_mut().set_selected(true);
            self.hovered_idx = 0;
        }
        self.items.push(item);
    }

    /// Wrap `item` in a shared handle and append it, returning the handle
    /// so the caller can keep reading it (toggles, entries).
    pub fn add(&mut self, item: impl MenuItem<S> + 'static) -> ItemHandle<S> {
        let handle: ItemHandle<S> = Rc::new(RefCell::new(item));
        self.add_item(Rc::clone(&handle));
        handle
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<ItemHandle<S>> {
        self.items.get(self.hovered_idx).cloned()
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.hovered_idx
    }

    /// Move the hover to `index`, clamped to the last item (out-of-range
    /// requests collapse to the end, they never wrap). No-op on an empty
    /// page.
    pub fn select_at_index(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        let index = index.min(self.items.len() - 1);

        if let Some(previous) = self.items.get(self.hovered_idx) {
            previous.borrow_mut().set_selected(false);
        }
        self.items[index].borrow_mut().set_selected(true);
        self.hovered_idx = index;
    }

    /// Offer the gesture to the hovered item, then advance the hover
    /// cyclically. A page with at least one item always consumes a scroll.
    pub fn scroll_forward(&mut self) -> bool {
        let Some(item) = self.selected_item() else {
            return false;
        };
        if item.borrow_mut().scroll_forward() {
            return true;
        }

        log::debug!("page '{}': hover forward", self.name);
        self.select_at_index((self.hovered_idx + 1) % self.items.len());
        true
    }

    pub fn scroll_backward(&mut self) -> bool {
        let Some(item) = self.selected_item() else {
            return false;
        };
        if item.borrow_mut().scroll_backward() {
            return true;
        }

        log::debug!("page '{}': hover backward", self.name);
        let last = self.items.len() - 1;
        let previous = self.hovered_idx.checked_sub(1).unwrap_or(last);
        self.select_at_index(previous);
        true
    }

    pub fn handle_select(&mut self) -> bool {
        self.selected_item()
            .is_some_and(|item| item.borrow_mut().handle_select())
    }

    pub fn handle_back(&mut self) -> bool {
        self.selected_item()
            .is_some_and(|item| item.borrow_mut().handle_back())
    }

    /// Reserved for page specializations; the base page declines.
    pub fn handle_double_click(&mut self) -> bool {
        false
    }

    /// Title line followed by every item, then a frame commit.
    pub fn draw(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear()?;
        surface.set_cursor(0, 0);
        surface.set_text_size(1);
        surface.set_wrap(false);

        surface.set_style(TextStyle::Normal);
        surface.println(&self.name)?;

        for item in &self.items {
            item.borrow_mut().draw(surface)?;
        }

        surface.flush()
    }
}

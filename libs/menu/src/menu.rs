use crate::events::InputEvent;
use crate::items::PageHandle;
use crate::surface::Surface;

/// Owns the page catalog and the navigation stack, and translates
/// classified encoder events into calls on the top-of-stack page.
///
/// The catalog retains every known page for the lifetime of the menu; the
/// stack is the root-to-current navigation path and the top entry is the
/// only visible, interactive page. The stack should never be popped below
/// one entry once a root page is pushed; guarding that is the caller's
/// responsibility.
pub struct Menu<S: Surface> {
    pages: Vec<PageHandle<S>>,
    stack: Vec<PageHandle<S>>,
}

impl<S: Surface> Menu<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Retain a page in the catalog without showing it.
    pub fn add_page(&mut self, page: PageHandle<S>) {
        self.pages.push(page);
    }

    /// Make `page` the visible page, keeping the current one beneath it
    /// for back-navigation.
    pub fn push_page(&mut self, page: PageHandle<S>) {
        self.stack.push(page);
    }

    pub fn pop_page(&mut self) {
        if self.stack.pop().is_none() {
            log::warn!("pop on an empty page stack");
        }
    }

    #[must_use]
    pub fn current_page(&self) -> Option<PageHandle<S>> {
        self.stack.last().cloned()
    }

    /// Navigation stack depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Dispatch one classified event. Press and long-release carry no
    /// semantic action; they are reserved for UI feedback.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press => log::debug!("encoder press"),
            InputEvent::Release => {
                log::debug!("encoder release");
                self.handle_select();
            }
            InputEvent::DoubleClick => {
                log::debug!("encoder double-click");
                self.handle_double_click();
            }
            InputEvent::LongPress => {
                log::debug!("encoder long-press");
                self.handle_back();
            }
            InputEvent::LongRelease => log::debug!("encoder long-press released"),
        }
    }

    pub fn scroll_forward(&mut self) {
        if let Some(page) = self.current_page() {
            page.borrow_mut().scroll_forward();
        }
    }

    pub fn scroll_backward(&mut self) {
        if let Some(page) = self.current_page() {
            page.borrow_mut().scroll_backward();
        }
    }

    /// Select on the visible page; when the page declines, advance into the
    /// hovered item's navigation target. This is the sole way forward
    /// through the page hierarchy.
    fn handle_select(&mut self) {
        let Some(page) = self.current_page() else {
            return;
        };
        if page.borrow_mut().handle_select() {
            return;
        }

        let target = page
            .borrow()
            .selected_item()
            .and_then(|item| item.borrow().target());
        if let Some(next) = target {
            self.push_page(next);
        }
    }

    fn handle_double_click(&mut self) {
        if let Some(page) = self.current_page() {
            if page.borrow_mut().handle_double_click() {
                return;
            }
        }
        // Back-navigation on double-click is deliberately disabled.
    }

    fn handle_back(&mut self) {
        if let Some(page) = self.current_page() {
            page.borrow_mut().handle_back();
        }
    }

    /// Draw the visible page; an empty stack draws nothing.
    pub fn draw(&mut self, surface: &mut S) -> Result<(), S::Error> {
        if let Some(page) = self.current_page() {
            page.borrow_mut().draw(surface)
        } else {
            log::warn!("no menu page on the stack");
            Ok(())
        }
    }
}

impl<S: Surface> Default for Menu<S> {
    fn default() -> Self {
        Self::new()
    }
}

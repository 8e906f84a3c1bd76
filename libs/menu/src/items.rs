pub mod string_entry;
pub mod toggle_entry;

pub use string_entry::StringEntry;
pub use toggle_entry::ToggleEntry;

use std::cell::RefCell;
use std::rc::Rc;

use crate::page::Page;
use crate::surface::{Surface, TextStyle};

/// Zero-argument action bound to an item at construction time.
pub type SelectCallback = Box<dyn FnMut()>;

/// Shared handle to a page. Pages are referenced from the menu catalog, the
/// navigation stack and any item targeting them, so they are reference
/// counted. The whole framework is single-threaded by construction.
pub type PageHandle<S> = Rc<RefCell<Page<S>>>;

/// Shared handle to any menu item.
pub type ItemHandle<S> = Rc<RefCell<dyn MenuItem<S>>>;

/// Contract implemented by every selectable or informational line.
///
/// The `scroll_*`/`handle_*` methods return `true` when the item consumed
/// the gesture and `false` to let the owning page apply its default
/// behaviour instead.
pub trait MenuItem<S: Surface> {
    fn name(&self) -> &str;

    fn is_selectable(&self) -> bool;

    fn is_selected(&self) -> bool;

    /// Set the hover flag. Ignored when the item is not selectable.
    fn set_selected(&mut self, state: bool);

    /// Page pushed onto the navigation stack when this item is activated
    /// and declines the select itself.
    fn target(&self) -> Option<PageHandle<S>> {
        None
    }

    fn scroll_forward(&mut self) -> bool {
        false
    }

    fn scroll_backward(&mut self) -> bool {
        false
    }

    /// Perform the item's primary action.
    fn handle_select(&mut self) -> bool;

    /// React to a back gesture; editable widgets use this to cycle modes.
    fn handle_back(&mut self) -> bool {
        false
    }

    /// Render one line onto the surface, cursor already positioned.
    fn draw(&mut self, surface: &mut S) -> Result<(), S::Error>;
}

/// Plain menu line: an optional action, an optional navigation target, or
/// just a label.
pub struct Item<S: Surface> {
    name: String,
    selectable: bool,
    selected: bool,
    target: Option<PageHandle<S>>,
    callback: Option<SelectCallback>,
}

impl<S: Surface> Item<S> {
    /// Selectable item with no action; a select on it is declined, which
    /// lets the menu fall back to target navigation (there is none here).
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            selectable: true,
            selected: false,
            target: None,
            callback: None,
        }
    }

    /// Non-selectable informational line.
    #[must_use]
    pub fn label(name: &str) -> Self {
        Self {
            selectable: false,
            ..Self::new(name)
        }
    }

    /// Item that navigates into `target` when activated.
    #[must_use]
    pub fn submenu(name: &str, target: &PageHandle<S>) -> Self {
        Self {
            target: Some(Rc::clone(target)),
            ..Self::new(name)
        }
    }

    /// Item bound to a zero-argument action.
    #[must_use]
    pub fn action(name: &str, callback: impl FnMut() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
            ..Self::new(name)
        }
    }

    /// Attach a navigation target to an existing item. The target is only
    /// entered when the item declines the select itself.
    #[must_use]
    pub fn with_target(mut self, target: &PageHandle<S>) -> Self {
        self.target = Some(Rc::clone(target));
        self
    }

    /// Trigger the item's primary action programmatically, as if it had
    /// been selected through the encoder.
    pub fn invoke(&mut self) -> bool {
        self.handle_select()
    }
}

impl<S: Surface> MenuItem<S> for Item<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_selectable(&self) -> bool {
        self.selectable
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, state: bool) {
        if self.selectable {
            self.selected = state;
        }
    }

    fn target(&self) -> Option<PageHandle<S>> {
        self.target.clone()
    }

    fn handle_select(&mut self) -> bool {
        if let Some(callback) = self.callback.as_mut() {
            callback();
            true
        } else {
            log::info!("item '{}' has no bound action", self.name);
            false
        }
    }

    fn draw(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.set_style(TextStyle::Normal);
        if self.selectable {
            if self.selected {
                surface.set_style(TextStyle::Inverted);
                surface.print(">")?;
            } else {
                surface.print(" ")?;
            }
        }
        surface.println(&self.name)
    }
}

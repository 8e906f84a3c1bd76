use crate::items::MenuItem;
use crate::surface::{Surface, TextStyle};

/// Cyclic selection among a fixed list of display values.
///
/// Every select advances the selection by one, wrapping past the end, and
/// is always consumed.
pub struct ToggleEntry {
    name: String,
    selected: bool,
    values: Vec<String>,
    selected_idx: usize,
}

impl ToggleEntry {
    /// `values` must be non-empty.
    #[must_use]
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            selected: false,
            values: values.iter().map(ToString::to_string).collect(),
            selected_idx: 0,
        }
    }

    #[must_use]
    pub fn selected_value(&self) -> &str {
        self.values
            .get(self.selected_idx)
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_idx
    }

    /// Clamped to the last value.
    pub fn set_selected_index(&mut self, index: usize) {
        self.selected_idx = index.min(self.values.len().saturating_sub(1));
    }
}

impl<S: Surface> MenuItem<S> for ToggleEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_selectable(&self) -> bool {
        true
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, state: bool) {
        self.selected = state;
    }

    fn handle_select(&mut self) -> bool {
        if !self.values.is_empty() {
            self.selected_idx = (self.selected_idx + 1) % self.values.len();
        }
        true
    }

    fn draw(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.set_style(TextStyle::Normal);
        surface.print(&self.name)?;
        surface.print(": ")?;

        if self.selected {
            surface.set_style(TextStyle::Inverted);
            surface.print(">")?;
        } else {
            surface.print(" ")?;
        }
        surface.println(self.selected_value())
    }
}

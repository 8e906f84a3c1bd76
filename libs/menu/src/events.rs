/// Classified input events produced by the external encoder/button driver.
///
/// Debouncing and press/click/long-press classification happen upstream;
/// the menu only consumes the final discrete kinds. Rotation is delivered
/// separately through [`crate::Menu::scroll_forward`] and
/// [`crate::Menu::scroll_backward`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Press,       // button went down; reserved for UI feedback
    Release,     // short press released; select intent
    DoubleClick, // reserved for page-level shortcuts
    LongPress,   // back / entry-mode-cycle intent
    LongRelease, // long press released; reserved for UI feedback
}

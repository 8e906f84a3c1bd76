//! Stack-based menu framework for small monochrome character displays
//! driven by a single rotary encoder with a push button.
//!
//! A [`Menu`] owns a navigation stack of [`Page`]s; each page holds an
//! ordered list of items implementing the [`MenuItem`] contract. Classified
//! input events ([`InputEvent`]) are dispatched top-down and each handler
//! reports whether it consumed the event, so unhandled gestures fall back to
//! default behaviour (hover movement, target-page navigation).
//!
//! Rendering goes through the [`Surface`] capability so the same widgets
//! draw onto an `embedded-graphics` display ([`surface::GraphicsSurface`])
//! or a headless character grid ([`surface::TextBuffer`]).

pub mod events;
pub mod items;
pub mod menu;
pub mod page;
pub mod surface;

// Re-export commonly used types
pub use events::InputEvent;
pub use items::string_entry::{DEFAULT_VALID_CHARS, EntryMode, MASK_SLOT, StringEntry};
pub use items::toggle_entry::ToggleEntry;
pub use items::{Item, ItemHandle, MenuItem, PageHandle, SelectCallback};
pub use menu::Menu;
pub use page::Page;
pub use surface::{DisplayGeometry, Surface, TextStyle};

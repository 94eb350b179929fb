//! Navigation menus and their desktop/mobile interaction state.
pub mod expand;
pub mod hover;
pub mod menu;

pub use expand::ExpandState;
pub use hover::HoverMenu;
pub use menu::{MenuEntry, NavMenu};

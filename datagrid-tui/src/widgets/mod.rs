//! Reusable widget components.

pub mod chips;
pub mod command_bar;
pub mod menu;

pub use chips::{Chip, FilterChips};
pub use command_bar::CommandBar;
pub use menu::{Menu, MenuItem};

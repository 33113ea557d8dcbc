pub mod controller;
pub mod grid;
pub mod view_mode;

pub use controller::{Command, ViewModeController};
pub use grid::Direction;
pub use view_mode::ViewMode;

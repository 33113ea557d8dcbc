pub mod anchor;
pub mod date_range;
pub mod workday;

pub use anchor::AnchorNavigator;

pub mod display;
pub mod view_models;

#[cfg(feature = "gui")]
pub mod board_layout;
#[cfg(feature = "gui")]
pub mod components;
#[cfg(feature = "gui")]
pub mod theme;
#[cfg(feature = "gui")]
pub mod views;

#[cfg(feature = "gui")]
pub use board_layout::BoardLayout;

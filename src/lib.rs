//! Click Chess - a point-and-click match controller for two players at one
//! board, with legality delegated to a rules engine and every move logged.
//!
//! The `gui` feature adds the GPUI presentation layer and the binary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;

#[cfg(feature = "gui")]
pub mod app;

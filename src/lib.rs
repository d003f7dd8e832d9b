//! Whisker Wharf library crate: re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can import game types, systems, and resources without needing a
//! window or GPU.

pub mod shared;
pub mod input;
pub mod data;
pub mod actions;
pub mod poles;
pub mod fishing;
pub mod cats;
pub mod triggers;
pub mod player;
pub mod world;
pub mod ui;

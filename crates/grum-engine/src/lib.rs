//! Grum engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the character app.

pub mod device;
pub mod lifecycle;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod path;
pub mod render;
pub mod paint;

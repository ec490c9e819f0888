//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into
//! `InputEvent`s.

mod state;
mod types;

pub(crate) mod platform {
    pub mod winit;
}

pub use state::InputState;
pub use types::{
    InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

//! Time subsystem.
//!
//! Provides the wrapping animation clock without coupling to the runtime.
//! Intended usage:
//! - one `PhaseClock` per render loop
//! - call `angle()` once per frame to obtain the current rocking rotation

mod phase;

pub use phase::PhaseClock;

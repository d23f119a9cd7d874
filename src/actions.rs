//! Dispatch of menu actions to the operating system.
//!
//! The executor launches scripts and executables fire-and-forget and
//! opens URLs with the platform handler; the navigation layer never does
//! I/O itself.

mod executor;

pub use executor::*;

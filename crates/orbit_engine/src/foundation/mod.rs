//! Foundation utilities shared by every subsystem
//!
//! Math types, frame timing, and logging setup. Nothing in here knows about
//! scenes or rendering.

pub mod logging;
pub mod math;
pub mod time;

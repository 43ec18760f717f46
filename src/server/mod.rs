//! TCP listener that hands each accepted connection to the HTTP state machine.

pub mod listener;

//! Adapter implementations of the board core's ports.

pub mod memory;

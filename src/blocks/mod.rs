//! Typed accessors for the peripherals in the bring-up design.
//!
//! Each block holds a weak upward pointer to the design's shared transport
//! and is addressed by register name, so the same block works over any
//! [`crate::transport::Transport`].

pub mod bram;
pub mod ctrl;

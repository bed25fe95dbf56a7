//! Monitor and control of an AXI-lite gated BRAM peripheral.
//!
//! The design exposes four 32-bit control registers and a 128-bit-wide BRAM
//! whose data port sits behind an access-enable gate (bit 0 of the last
//! control register). Register addresses are injected through a
//! [`core::BringupLayout`] rather than baked in, so the same blocks run
//! against a live board over [`transport::local::Local`] or against the
//! simulated [`transport::mock::Mock`] in tests.

pub mod blocks;
pub mod core;
pub mod prelude;
pub mod transport;

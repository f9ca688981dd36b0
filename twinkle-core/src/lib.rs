//! Board-agnostic core logic for the cabinet I/O controller
//!
//! This crate contains everything above the wire protocol that does not
//! depend on a specific board:
//!
//! - Configuration types and the on-target config parser
//! - Text-scroll and lamp-chase schedulers
//! - Poll cycle coordinator (one tick = read all inputs, write all outputs)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod poll;
pub mod scheduler;

//! # Burn NLP Heads
//!
//! Classifier heads that turn encoder hidden states into token, sequence, or joint
//! intent/slot logits.
#![forbid(unsafe_code)]

/// Axis roles, port schemas and axis-tagged tensors
pub mod types;

/// Building blocks shared by the heads
pub mod modules;

/// Classifier heads
pub mod heads;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

/// Error macros
#[macro_use]
extern crate anyhow;

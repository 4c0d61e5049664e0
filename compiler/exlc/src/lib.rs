//! EXL driver library.
//!
//! Backs the `exl` binary: command handlers, argument configuration,
//! `ariadne` diagnostics for parse errors, and the golden-vector harness
//! shared by `exl test` and the crate's integration tests.

pub mod commands;
pub mod config;
pub mod diagnostics;
mod tracing_setup;
pub mod vectors;

pub use tracing_setup::init_tracing;

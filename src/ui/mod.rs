//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Status lines and command data
//!
//! # Design
//!
//! Every line a command prints for the user goes through this module so
//! that `--quiet` and `--json` behave the same everywhere. Diagnostics use
//! `tracing` instead.

pub mod output;

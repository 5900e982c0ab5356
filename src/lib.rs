//! xcodeproj - A Rust-native CLI for editing Xcode project files
//!
//! xcodeproj reads a `.xcodeproj` bundle's `project.pbxproj` into a typed
//! object graph, applies one mutation (add a file, a target, a package, a
//! build phase...) and writes the graph back in Xcode's own text format.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs Load → Verify → Mutate → Verify → Save for one operation
//! - [`ops`] - Graph operations, one module per command family
//! - [`codec`] - Reads and writes the pbxproj text format
//! - [`core`] - Domain types, object store, graph queries, verification and config
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! xcodeproj maintains the following invariants:
//!
//! 1. Every reference in a saved graph resolves to an object of the expected kind
//! 2. Every object is reachable from the root project
//! 3. A failed operation leaves the project file untouched

pub mod cli;
pub mod codec;
pub mod core;
pub mod engine;
pub mod ops;
pub mod ui;

//! core
//!
//! Core domain types, entity model and graph for xcodeproj.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ObjectId, ProductType, VersionRequirement, etc.
//! - [`model`] - Typed entities of the project object graph
//! - [`ids`] - Deterministic identifier allocation
//! - [`store`] - Object arena keyed by identifier
//! - [`graph`] - Project graph, name lookups and reverse-reference index
//! - [`verify`] - Structural invariant verification
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for project bundles
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Entity families are closed enums, matched exhaustively
//! - All verification is deterministic

pub mod config;
pub mod graph;
pub mod ids;
pub mod model;
pub mod paths;
pub mod store;
pub mod types;
pub mod verify;

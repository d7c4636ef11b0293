//! Wire types for the docgen service HTTP contract.
//!
//! This crate contains the serde-serializable types exchanged with the
//! documentation-generation service over HTTP. These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with the service routes: one module per message family
//! * Stable: Changes only when the wire contract changes
//!
//! Higher-level ergonomic APIs are built on top of these types in `docgen-rs`.

pub mod branches;
pub mod generation;
pub mod repos;

pub use branches::*;
pub use generation::*;
pub use repos::*;

//! healthpro-core
//!
//! Pure domain types, field path resolution, value classification and
//! artifact naming conventions. No I/O; this is the shared vocabulary of
//! the report engine.

pub mod artifact_names;
pub mod classify;
pub mod error;
pub mod models;
pub mod resolve;

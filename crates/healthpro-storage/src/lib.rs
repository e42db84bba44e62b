//! healthpro-storage
//!
//! The report artifact directory and the assessment record repository.

pub mod artifacts;
pub mod error;
pub mod records;

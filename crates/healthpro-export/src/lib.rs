//! healthpro-export
//!
//! Assessment record + report definition → renderable document → HTML →
//! PDF artifact.

pub mod document;
pub mod error;
pub mod field;
pub mod layouts;
pub mod pdf;
pub mod pipeline;
pub mod render;
pub mod section;
pub mod service;
pub mod styles;

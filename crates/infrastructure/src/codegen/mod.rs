//! Code generation infrastructure.
//!
//! This module turns a section tree into enum source text for the supported
//! dialects, plus the optional testing and migration helpers.

mod generator;
mod helpers;
mod kotlin;
mod plan;
mod swift;

pub use generator::{CodeGenerator, generate_code};
pub use kotlin::escape_kotlin;
pub use swift::escape_swift;

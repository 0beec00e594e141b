//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod content_source;

pub use clock::Clock;
pub use content_source::{ContentSource, SourceError};

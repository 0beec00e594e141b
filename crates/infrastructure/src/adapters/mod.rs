//! Adapter implementations for application ports.

mod contentful_source;
mod snapshot_source;
mod system_clock;

pub use contentful_source::{ContentfulGraphQlSource, ContentfulSettings, DEFAULT_BASE_URL};
pub use snapshot_source::SnapshotFileSource;
pub use system_clock::{FixedClock, SystemClock};

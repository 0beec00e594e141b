//! Application use cases (business logic orchestration).

mod build_locale_bundle;
mod load_section_tree;

pub use build_locale_bundle::*;
pub use load_section_tree::*;

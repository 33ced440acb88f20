//! Built-in vocabulary tables.
//!
//! Hand-curated presets and reserved strings that every run starts from
//! unless configuration opts out of them.

pub mod blacklist;
pub mod presets;

//! Media entity model shared by every provider.

mod types;

pub use types::*;

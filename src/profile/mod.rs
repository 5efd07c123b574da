//! Car profiles: the settings catalog, the on-disk format, and keystroke
//! planning.

pub mod catalog;
pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

//! Safe wrappers around the Win32 calls the replay tool needs.
//!
//! Hotkey registration, synthetic key output, the message pump, modal
//! dialogs, and the small probes used for logging and the instance lock.

pub mod hotkey;
pub mod input;
pub mod message_box;
pub mod message_loop;
pub mod process;
pub mod window;

pub use hotkey::*;
pub use input::*;
pub use message_box::*;
pub use message_loop::*;
pub use process::*;
pub use window::*;

//! ProTune - The Crew Motorfest tuning replay tool.
//!
//! Loads a car's pro-setting targets from a profile file, plans the exact
//! arrow-key sequence the in-game tuning menu needs, and replays that
//! sequence into the focused window on a global hotkey.
//!
//! The replay is open-loop: nothing observes what the game actually did
//! with each keypress. The profile, catalog, and engine are portable and
//! fully testable; everything that touches the Windows input queue lives
//! behind `cfg(windows)`.

pub mod config;
pub mod profile;
pub mod replay;

#[cfg(windows)]
pub mod tray;

#[cfg(windows)]
pub mod winapi_utils;

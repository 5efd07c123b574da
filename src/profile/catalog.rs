//! The pro-settings menu, in the order the game presents it.
//!
//! One row per setting: the value change per keypress and, for the two
//! percentage sliders, the position the slider starts at. Those two are
//! the odd ones out: pressing Right moves their value DOWN.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One row of the pro-settings menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingSpec {
    /// Canonical setting name as used in profile files.
    pub name: &'static str,

    /// Value change per keypress.
    pub increment: f64,

    /// Slider start position for settings that begin at a fixed
    /// percentage; for these, Right decreases the value. `None` means the
    /// slider starts at the car default and the profile value is a signed
    /// delta, with Right increasing.
    pub menu_start: Option<f64>,
}

/// All pro settings, top to bottom as the menu shows them.
pub const MENU_ORDER: [SettingSpec; 18] = [
    SettingSpec { name: "final_drive", increment: 1.0, menu_start: None },
    SettingSpec { name: "front_power_distrib", increment: 1.0, menu_start: Some(60.0) },
    SettingSpec { name: "grip_front", increment: 1.0, menu_start: None },
    SettingSpec { name: "grip_rear", increment: 1.0, menu_start: None },
    SettingSpec { name: "front_brake_balance", increment: 1.0, menu_start: Some(80.0) },
    SettingSpec { name: "brake_power", increment: 1.0, menu_start: None },
    SettingSpec { name: "load_front", increment: 1.0, menu_start: None },
    SettingSpec { name: "load_rear", increment: 1.0, menu_start: None },
    SettingSpec { name: "spring_front", increment: 1.0, menu_start: None },
    SettingSpec { name: "spring_rear", increment: 1.0, menu_start: None },
    SettingSpec { name: "compression_front", increment: 1.0, menu_start: None },
    SettingSpec { name: "compression_rear", increment: 1.0, menu_start: None },
    SettingSpec { name: "rebound_front", increment: 1.0, menu_start: None },
    SettingSpec { name: "rebound_rear", increment: 1.0, menu_start: None },
    SettingSpec { name: "arb_front", increment: 1.0, menu_start: None },
    SettingSpec { name: "arb_rear", increment: 1.0, menu_start: None },
    // Camber is the one pair the game steps in hundredths of a degree.
    SettingSpec { name: "camber_front", increment: 0.01, menu_start: None },
    SettingSpec { name: "camber_rear", increment: 0.01, menu_start: None },
];

/// Name -> spec lookup over [`MENU_ORDER`].
static BY_NAME: Lazy<HashMap<&'static str, &'static SettingSpec>> =
    Lazy::new(|| MENU_ORDER.iter().map(|spec| (spec.name, spec)).collect());

/// Looks up a setting by its canonical name.
pub fn find(name: &str) -> Option<&'static SettingSpec> {
    BY_NAME.get(name).copied()
}

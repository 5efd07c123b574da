//! Loads a car profile file and plans its keystrokes.
//!
//! A profile is a small JSON file of target values keyed by canonical
//! setting name. Menu order comes from the catalog, never from the file;
//! catalog settings missing from the file are recorded as skipped (the
//! car does not expose them, so the menu has no row for them).

use crate::profile::catalog::{self, SettingSpec, MENU_ORDER};
use crate::profile::types::{AdjustKey, CarProfile, TuningSetting};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// On-disk profile format.
#[derive(Debug, Deserialize)]
struct ProfileFile {
    car: String,
    settings: HashMap<String, f64>,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown setting '{name}' in profile (compare against --list-settings)")]
    UnknownSetting { name: String },

    #[error("profile contains no settings")]
    NoSettings,
}

/// Reads and plans a profile from disk.
pub fn load_profile(path: &Path) -> Result<CarProfile, ProfileError> {
    load_profile_skipping(path, &[])
}

/// Same as [`load_profile`], but treats the named settings as if the file
/// had not listed them: they join the skipped set and get no menu row.
pub fn load_profile_skipping(path: &Path, skip: &[String]) -> Result<CarProfile, ProfileError> {
    let raw = fs::read_to_string(path)?;
    CarProfile::from_json_str_skipping(&raw, skip)
}

impl CarProfile {
    /// Parses a profile from JSON and converts each target value into the
    /// presses that reach it.
    ///
    /// A misspelled setting name fails the whole load: silently dropping
    /// it would shift every Down after it onto the wrong menu row.
    pub fn from_json_str(raw: &str) -> Result<Self, ProfileError> {
        Self::from_json_str_skipping(raw, &[])
    }

    /// [`from_json_str`](Self::from_json_str) with some settings removed
    /// up front. Skip names must still be catalog names.
    pub fn from_json_str_skipping(raw: &str, skip: &[String]) -> Result<Self, ProfileError> {
        let mut file: ProfileFile = serde_json::from_str(raw)?;
        for name in skip {
            if catalog::find(name).is_none() {
                return Err(ProfileError::UnknownSetting { name: name.clone() });
            }
            file.settings.remove(name);
        }
        if file.settings.is_empty() {
            return Err(ProfileError::NoSettings);
        }
        for name in file.settings.keys() {
            if catalog::find(name).is_none() {
                return Err(ProfileError::UnknownSetting { name: name.clone() });
            }
        }

        let mut settings = Vec::new();
        let mut skipped = Vec::new();
        for spec in MENU_ORDER.iter() {
            match file.settings.get(spec.name) {
                Some(&target) => settings.push(plan_setting(spec, target)),
                None => skipped.push(spec.name.to_string()),
            }
        }

        Ok(CarProfile {
            car: file.car,
            settings,
            skipped,
        })
    }
}

/// Converts one target value into a direction and press count.
///
/// Percentage sliders start at a fixed value and Right moves DOWN, so the
/// press count is the distance back from that start. Delta settings start
/// at the car default and Right moves up.
fn plan_setting(spec: &SettingSpec, target: f64) -> TuningSetting {
    let ticks = match spec.menu_start {
        Some(start) => ((start - target) / spec.increment).round() as i64,
        None => (target / spec.increment).round() as i64,
    };
    let key = if ticks >= 0 {
        AdjustKey::Right
    } else {
        AdjustKey::Left
    };

    TuningSetting {
        name: spec.name.to_string(),
        target,
        menu_start: spec.menu_start,
        key,
        presses: ticks.unsigned_abs() as u32,
    }
}

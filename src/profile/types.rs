//! Profile data model and keystroke planning.
//!
//! A [`CarProfile`] is the fully planned setup for one car: every menu row
//! to visit in order, each with a direction and press count. It is static
//! after load and read-only at run time; the key stream it plans is the
//! whole output of the tool.

/// One of the two directions a setting can be adjusted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustKey {
    Left,
    Right,
}

/// A key the replay engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayKey {
    Left,
    Right,
    Down,
}

impl From<AdjustKey> for ReplayKey {
    fn from(key: AdjustKey) -> Self {
        match key {
            AdjustKey::Left => ReplayKey::Left,
            AdjustKey::Right => ReplayKey::Right,
        }
    }
}

/// One planned menu row: the setting, its target, and the presses that
/// reach the target from the row's start position.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningSetting {
    pub name: String,

    /// Target value from the profile file.
    pub target: f64,

    /// Slider start for percentage settings; `None` for delta settings.
    pub menu_start: Option<f64>,

    /// Which adjustment key to press.
    pub key: AdjustKey,

    /// How many times to press it. 0 means the row is visited but left
    /// alone.
    pub presses: u32,
}

/// A fully planned car setup: every menu row to visit, in menu order.
#[derive(Debug, Clone, PartialEq)]
pub struct CarProfile {
    pub car: String,

    pub settings: Vec<TuningSetting>,

    /// Catalog settings this car does not expose. No menu row, no Down.
    pub skipped: Vec<String>,
}

impl CarProfile {
    /// The exact key stream a replay emits: each row's presses, with one
    /// Down between consecutive rows. A row with zero presses still costs
    /// its Down; the cursor has to pass it either way.
    pub fn key_events(&self) -> Vec<ReplayKey> {
        let mut events = Vec::with_capacity(self.total_events());
        for (i, setting) in self.settings.iter().enumerate() {
            if i > 0 {
                events.push(ReplayKey::Down);
            }
            events.extend(
                std::iter::repeat(ReplayKey::from(setting.key)).take(setting.presses as usize),
            );
        }
        events
    }

    /// Total adjustment presses across all rows.
    pub fn adjust_count(&self) -> usize {
        self.settings.iter().map(|s| s.presses as usize).sum()
    }

    /// Down presses needed to walk the menu: one per row after the first.
    pub fn down_count(&self) -> usize {
        self.settings.len().saturating_sub(1)
    }

    /// Length of the full key stream.
    pub fn total_events(&self) -> usize {
        self.adjust_count() + self.down_count()
    }
}

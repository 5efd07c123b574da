//! Global hotkey registration.
//!
//! Provides an RAII wrapper around `RegisterHotKey` so the process-wide
//! binding is released when the guard goes out of scope.

use crate::config::{ComboKey, KeyCombo};
use thiserror::Error;
use windows::Win32::Foundation::ERROR_HOTKEY_ALREADY_REGISTERED;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT,
    MOD_SHIFT, MOD_WIN, VK_F1,
};

/// Identifier for the tool's single hotkey within its thread queue.
pub const HOTKEY_ID: i32 = 1;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("hotkey {combo} is already bound by another process")]
    AlreadyBound { combo: String },

    #[error("hotkey registration failed: {0}")]
    Os(#[from] windows::core::Error),
}

/// RAII guard for a registered global hotkey.
///
/// WM_HOTKEY messages land on the message queue of the thread that
/// constructed the guard, so that thread must pump messages. Dropping
/// the guard unregisters the binding.
pub struct HotkeyGuard {
    id: i32,
}

impl HotkeyGuard {
    /// Registers `combo` as a process-wide hotkey.
    ///
    /// A conflict with a binding held by another process is fatal to this
    /// registration; there is no fallback combo.
    pub fn register(id: i32, combo: &KeyCombo) -> Result<Self, RegistrationError> {
        let result =
            unsafe { RegisterHotKey(None, id, modifiers(combo), u32::from(virtual_key(combo))) };
        match result {
            Ok(()) => {
                tracing::info!(hotkey = %combo, "Hotkey registered");
                Ok(Self { id })
            }
            Err(e) if e.code() == ERROR_HOTKEY_ALREADY_REGISTERED.to_hresult() => {
                Err(RegistrationError::AlreadyBound {
                    combo: combo.to_string(),
                })
            }
            Err(e) => Err(RegistrationError::Os(e)),
        }
    }
}

impl Drop for HotkeyGuard {
    fn drop(&mut self) {
        let result = unsafe { UnregisterHotKey(None, self.id) };
        match result {
            Ok(()) => tracing::info!(id = self.id, "Hotkey unregistered"),
            Err(e) => tracing::error!(id = self.id, error = ?e, "Failed to unregister hotkey"),
        }
    }
}

fn modifiers(combo: &KeyCombo) -> HOT_KEY_MODIFIERS {
    // MOD_NOREPEAT keeps a held combo from retriggering while we replay.
    let mut mods = MOD_NOREPEAT;
    if combo.ctrl {
        mods |= MOD_CONTROL;
    }
    if combo.alt {
        mods |= MOD_ALT;
    }
    if combo.shift {
        mods |= MOD_SHIFT;
    }
    if combo.win {
        mods |= MOD_WIN;
    }
    mods
}

/// ASCII letters and digits map directly to their virtual-key codes;
/// function keys are a contiguous block starting at VK_F1.
fn virtual_key(combo: &KeyCombo) -> u16 {
    match combo.key {
        ComboKey::Char(c) => c.to_ascii_uppercase() as u16,
        ComboKey::Function(n) => VK_F1.0 + (u16::from(n) - 1),
    }
}

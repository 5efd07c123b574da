//! Synthetic keyboard output via `SendInput`.
//!
//! Events land in whatever window has keyboard focus; the tool has no
//! notion of a target window. There is also no delivery acknowledgment:
//! a rejected event is logged and the replay moves on.

use crate::profile::ReplayKey;
use crate::replay::KeyEmitter;
use std::mem;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_EXTENDEDKEY,
    KEYEVENTF_KEYUP, VIRTUAL_KEY, VK_DOWN, VK_LEFT, VK_RIGHT,
};

/// [`KeyEmitter`] backed by `SendInput`.
pub struct SendInputEmitter;

impl KeyEmitter for SendInputEmitter {
    fn emit(&mut self, key: ReplayKey) {
        send_replay_key(key);
    }
}

fn virtual_key(key: ReplayKey) -> VIRTUAL_KEY {
    match key {
        ReplayKey::Left => VK_LEFT,
        ReplayKey::Right => VK_RIGHT,
        ReplayKey::Down => VK_DOWN,
    }
}

/// Emits one press (key-down plus key-up) of the given key.
///
/// Arrow keys are extended keys; without KEYEVENTF_EXTENDEDKEY some
/// applications resolve them to the numpad variants.
pub fn send_replay_key(key: ReplayKey) {
    let vk = virtual_key(key);
    let inputs = [
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: vk,
                    wScan: 0,
                    dwFlags: KEYEVENTF_EXTENDEDKEY,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        },
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: vk,
                    wScan: 0,
                    dwFlags: KEYEVENTF_EXTENDEDKEY | KEYEVENTF_KEYUP,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        },
    ];

    let sent = unsafe { SendInput(&inputs, mem::size_of::<INPUT>() as i32) };
    if sent as usize != inputs.len() {
        tracing::warn!(?key, sent, "SendInput delivered fewer events than requested");
    }
}

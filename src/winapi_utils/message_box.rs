//! Modal message boxes for user-facing acknowledgments.

use windows::core::HSTRING;
use windows::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, MB_ICONINFORMATION, MB_ICONWARNING, MB_OK,
};

/// Blocking informational dialog.
pub fn show_info(title: &str, text: &str) {
    let title = HSTRING::from(title);
    let text = HSTRING::from(text);
    unsafe {
        MessageBoxW(None, &text, &title, MB_OK | MB_ICONINFORMATION);
    }
}

/// Blocking warning dialog.
pub fn show_warning(title: &str, text: &str) {
    let title = HSTRING::from(title);
    let text = HSTRING::from(text);
    unsafe {
        MessageBoxW(None, &text, &title, MB_OK | MB_ICONWARNING);
    }
}

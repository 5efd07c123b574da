//! Windows message pump with hotkey dispatch.
//!
//! WM_HOTKEY from `RegisterHotKey(None, ..)` arrives as a thread message,
//! so the pump handles it inline instead of dispatching it to a window.
//! The tray icon still needs regular translate/dispatch for its own
//! messages.

use std::sync::atomic::{AtomicU32, Ordering};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW, TranslateMessage, MSG,
    PM_REMOVE, WM_HOTKEY, WM_QUIT,
};

/// Pump thread id, for cross-thread quit signaling.
static MAIN_THREAD_ID: AtomicU32 = AtomicU32::new(0);

/// Pumps messages until WM_QUIT, invoking `on_hotkey` for every WM_HOTKEY
/// carrying `hotkey_id`.
///
/// The callback runs on this thread and blocks the pump for its full
/// duration. By the time it returns, further presses of the hotkey have
/// piled up in the queue; those are drained and discarded, so one press
/// means one replay rather than a backlog of them.
pub fn run_hotkey_loop<F: FnMut()>(hotkey_id: i32, mut on_hotkey: F) {
    let thread_id = unsafe { GetCurrentThreadId() };
    MAIN_THREAD_ID.store(thread_id, Ordering::SeqCst);

    tracing::debug!(thread_id, "Message loop starting");

    let mut msg = MSG::default();

    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            if msg.message == WM_HOTKEY && msg.wParam.0 as i32 == hotkey_id {
                on_hotkey();
                drain_pending_hotkeys(hotkey_id);
            } else {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    tracing::debug!("Message loop exited");
}

/// Removes queued WM_HOTKEY messages without acting on them.
fn drain_pending_hotkeys(hotkey_id: i32) {
    let mut discarded = 0u32;
    let mut msg = MSG::default();

    unsafe {
        while PeekMessageW(&mut msg, None, WM_HOTKEY, WM_HOTKEY, PM_REMOVE).as_bool() {
            if msg.wParam.0 as i32 == hotkey_id {
                discarded += 1;
            }
        }
    }

    if discarded > 0 {
        tracing::debug!(discarded, "Dropped hotkey presses queued during replay");
    }
}

/// Posts WM_QUIT to the pump thread. Callable from any thread; the tray
/// menu handler and the Ctrl+C handler both use it.
pub fn post_quit_message(exit_code: i32) {
    let main_thread_id = MAIN_THREAD_ID.load(Ordering::SeqCst);

    if main_thread_id == 0 {
        tracing::warn!("Pump thread id not set, cannot post quit message");
        return;
    }

    unsafe {
        let result = PostThreadMessageW(
            main_thread_id,
            WM_QUIT,
            windows::Win32::Foundation::WPARAM(exit_code as usize),
            windows::Win32::Foundation::LPARAM(0),
        );

        if let Err(e) = result {
            tracing::error!(?e, "Failed to post quit message");
        } else {
            tracing::debug!(exit_code, thread_id = main_thread_id, "Posted quit message");
        }
    }
}

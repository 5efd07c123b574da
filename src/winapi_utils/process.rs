//! Process liveness probe for the single-instance lock.

use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};

/// Whether a process with this PID is still alive.
///
/// Distinguishes a live instance from a stale lock file left behind by a
/// crash. Opening with query-limited rights succeeds for any live
/// process we could have started ourselves.
pub fn is_process_running(pid: u32) -> bool {
    unsafe {
        match OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) {
            Ok(handle) => {
                let _ = CloseHandle(handle);
                true
            }
            Err(_) => false,
        }
    }
}

// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Ctrl-C while the shell is waiting on a line.
//
// The prompt reads in cooked mode, so Ctrl-C arrives as SIGINT. The default
// disposition kills the process on the spot and leaves the user staring at
// our alternate screen with no cursor. std's line reader retries reads that
// fail with EINTR, so there's no way to surface the interrupt to the loop
// either.
//
// Instead the handler does the restore itself: it writes the emergency
// restore sequence to fd 1 and `_exit`s with the conventional 128 + SIGINT
// status. Both calls are async-signal-safe.

use std::sync::Once;

#[cfg(unix)]
use crate::surface;

/// Exit status used after an interrupt (128 + SIGINT).
pub const INTERRUPTED_STATUS: i32 = 130;

static HANDLER_INSTALLED: Once = Once::new();

/// Install the SIGINT handler (once per process).
#[cfg(unix)]
pub fn install_handler() {
    HANDLER_INSTALLED.call_once(|| unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigint_handler as *const () as usize;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &raw const sa, std::ptr::null_mut());
    });
}

#[cfg(not(unix))]
pub fn install_handler() {
    // No-op on non-unix platforms.
    HANDLER_INSTALLED.call_once(|| {});
}

#[cfg(unix)]
extern "C" fn sigint_handler(_sig: libc::c_int) {
    surface::emergency_restore();
    unsafe { libc::_exit(INTERRUPTED_STATUS) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_status_is_conventional() {
        assert_eq!(INTERRUPTED_STATUS, 128 + 2);
    }

    #[test]
    fn install_handler_is_idempotent() {
        install_handler();
        install_handler();
        assert!(HANDLER_INSTALLED.is_completed());
    }
}

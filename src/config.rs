//! The ambient record-mode flag: a process-wide default plus thread-scoped
//! overrides that restore on every exit path.

use std::{
    cell::RefCell,
    sync::atomic::{AtomicBool, Ordering},
};

static RECORDING: AtomicBool = AtomicBool::new(false);

thread_local! {
    static RECORDING_OVERRIDES: RefCell<Vec<bool>> = RefCell::new(Vec::new());
}

/// Turns record mode on or off process-wide.
pub fn set_recording(recording: bool) {
    RECORDING.store(recording, Ordering::SeqCst);
}

/// The effective record-mode flag: the innermost scoped override if one is
/// active, else the process-wide flag.
#[must_use]
pub fn is_recording() -> bool {
    RECORDING_OVERRIDES
        .with(|overrides| overrides.borrow().last().copied())
        .unwrap_or_else(|| RECORDING.load(Ordering::SeqCst))
}

/// Runs `f` with the record-mode flag overridden for its dynamic extent. The
/// previous value is restored on every exit path, including unwinding.
pub fn with_recording<T>(recording: bool, f: impl FnOnce() -> T) -> T {
    struct Guard;

    impl Drop for Guard {
        fn drop(&mut self) {
            RECORDING_OVERRIDES.with(|overrides| {
                overrides.borrow_mut().pop();
            });
        }
    }

    RECORDING_OVERRIDES.with(|overrides| overrides.borrow_mut().push(recording));
    let _guard = Guard;
    f()
}

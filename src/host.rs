//! The host test framework, as the engine sees it: a way to report failures
//! and a way to run once after the test bundle finishes.

use once_cell::sync::Lazy;
use std::{
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

/// The two capabilities the engine needs from the host test framework.
pub trait Host: Send + Sync {
    /// Reports a test failure at `file`:`line`.
    fn fail(&self, message: &str, file: &Path, line: usize);

    /// Arranges for `callback` to run once, after the test bundle finishes.
    /// Hosts whose lifecycle observers are main-thread-only must forward the
    /// registration there.
    fn install_on_bundle_finished(&self, callback: Box<dyn FnOnce() + Send>);
}

static HOST: Lazy<RwLock<Arc<dyn Host>>> = Lazy::new(|| RwLock::new(Arc::new(DefaultHost)));

/// Replaces the process-wide host. Embedding harnesses install theirs before
/// the first assertion runs.
pub fn set_host(host: Arc<dyn Host>) {
    *HOST.write().unwrap_or_else(PoisonError::into_inner) = host;
}

pub(crate) fn host() -> Arc<dyn Host> {
    HOST.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Stands in when the embedding harness does not install its own host:
/// failures panic, like any other assertion, and the flush runs at process
/// exit.
struct DefaultHost;

impl Host for DefaultHost {
    #[allow(clippy::panic)]
    fn fail(&self, message: &str, file: &Path, line: usize) {
        panic!("{}:{line}: {message}", file.display());
    }

    fn install_on_bundle_finished(&self, callback: Box<dyn FnOnce() + Send>) {
        install_at_exit(callback);
    }
}

#[cfg(unix)]
fn install_at_exit(callback: Box<dyn FnOnce() + Send>) {
    use std::sync::{Mutex, Once};

    static CALLBACKS: Mutex<Vec<Box<dyn FnOnce() + Send>>> = Mutex::new(Vec::new());
    static INSTALL: Once = Once::new();

    extern "C" fn run_callbacks() {
        let callbacks =
            std::mem::take(&mut *CALLBACKS.lock().unwrap_or_else(PoisonError::into_inner));
        for callback in callbacks {
            callback();
        }
    }

    CALLBACKS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(callback);
    INSTALL.call_once(|| {
        // A panic escaping `run_callbacks` aborts the process, which is the
        // documented outcome of a failed flush.
        let _: libc::c_int = unsafe { libc::atexit(run_callbacks) };
    });
}

#[cfg(not(unix))]
fn install_at_exit(_callback: Box<dyn FnOnce() + Send>) {
    log::warn!("this platform has no bundle-finished hook; snapshots will not be flushed");
}
